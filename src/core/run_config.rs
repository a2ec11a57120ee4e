//! Run configuration
//!
//! Everything the orchestrator needs is carried in [`RunConfig`], built once
//! by the CLI layer from flags, the global config file and built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::defaults::{DEFAULT_CACHE_DIR, DEFAULT_PIP, DEFAULT_PYTHON, POLL_INTERVAL};
use crate::core::skip::SkipSet;

/// Where the dependency set comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A requirements list file, one dependency per line
    Requirements(PathBuf),
    /// A `setup.py` or the directory containing it
    Project(PathBuf),
}

/// Optional RPM metadata forwarded to the build command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildMetadata {
    pub packager: Option<String>,
    pub vendor: Option<String>,
    pub group: Option<String>,
    pub release: Option<String>,
}

impl BuildMetadata {
    /// `--name value` pairs for every field that is set
    pub fn to_args(&self) -> Vec<String> {
        [
            ("--packager", &self.packager),
            ("--vendor", &self.vendor),
            ("--group", &self.group),
            ("--release", &self.release),
        ]
        .into_iter()
        .filter_map(|(flag, value)| value.as_ref().map(|v| [flag.to_string(), v.clone()]))
        .flatten()
        .collect()
    }
}

/// Downloader settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Downloader executable
    pub pip: String,
    /// Shared download cache
    pub cache_dir: PathBuf,
    /// Resolve from the cache only
    pub fast: bool,
    /// Extra arguments appended untouched
    pub extra_args: Vec<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            pip: DEFAULT_PIP.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            fast: false,
            extra_args: Vec::new(),
        }
    }
}

/// Build command settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Interpreter that runs each `setup.py`
    pub python: String,
    /// Names never built
    pub skip: SkipSet,
    /// Continue past failed builds
    pub ignore_build_errors: bool,
    /// Delete `setup.cfg` before building
    pub remove_setup_cfg: bool,
    /// Forwarded RPM metadata
    pub metadata: BuildMetadata,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
            skip: SkipSet::with_defaults(),
            ignore_build_errors: false,
            remove_setup_cfg: true,
            metadata: BuildMetadata::default(),
        }
    }
}

/// Complete configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: InputSource,
    /// Destination for produced RPMs; created if missing, never cleared
    pub output_dir: PathBuf,
    /// Parent of the staging directory; the system temp dir when unset
    pub staging_root: Option<PathBuf>,
    /// Leave the staging directory behind
    pub keep_dir: bool,
    /// Interval between child exit checks
    pub poll_interval: Duration,
    pub fetch: FetchOptions,
    pub build: BuildOptions,
}

impl RunConfig {
    /// Defaults for everything except input and output
    pub fn new(input: InputSource, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input,
            output_dir: output_dir.into(),
            staging_root: None,
            keep_dir: false,
            poll_interval: POLL_INTERVAL,
            fetch: FetchOptions::default(),
            build: BuildOptions::default(),
        }
    }
}
