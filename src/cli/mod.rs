//! Command-line interface module
//!
//! This module handles argument parsing and output formatting. Flags are
//! merged with the global config file into a [`RunConfig`]; the pipeline
//! itself lives in [`crate::core::orchestrator`].

pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::defaults::{DEFAULT_CACHE_DIR, DEFAULT_PIP, DEFAULT_PYTHON};
use crate::core::global_config::GlobalConfig;
use crate::core::orchestrator::Orchestrator;
use crate::core::preflight;
use crate::core::run_config::{BuildMetadata, InputSource, RunConfig};
use crate::core::skip::SkipSet;
use crate::error::ConfigError;
use crate::infra::dirs::Pip2RpmDirs;
use crate::infra::process::SystemRunner;

/// pip2rpm - build RPMs from Python dependencies
///
/// Downloads source distributions for a requirements list or a project's
/// setup script, unpacks them, and runs `setup.py bdist_rpm` on each.
#[derive(Parser, Debug)]
#[command(name = "pip2rpm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Requirements file listing the packages to build
    #[arg(short = 'r', long = "reqs", value_name = "FILE", conflicts_with = "setup")]
    pub reqs: Option<PathBuf>,

    /// setup.py (or its directory) whose dependencies are built
    #[arg(short = 's', long, value_name = "PATH")]
    pub setup: Option<PathBuf>,

    /// Directory receiving the built RPMs (created if missing)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Shared download cache directory
    #[arg(short, long, value_name = "DIR", env = "PIP2RPM_CACHE")]
    pub cache: Option<PathBuf>,

    /// Only use packages already in the cache
    #[arg(long)]
    pub fast: bool,

    /// Package name not to build (repeatable, case-insensitive)
    #[arg(long, value_name = "NAME")]
    pub skip: Vec<String>,

    /// RPM group
    #[arg(long)]
    pub group: Option<String>,

    /// RPM packager
    #[arg(long)]
    pub packager: Option<String>,

    /// RPM vendor
    #[arg(long)]
    pub vendor: Option<String>,

    /// RPM release
    #[arg(long)]
    pub release: Option<String>,

    /// pip executable
    #[arg(long, value_name = "EXECUTABLE", env = "PIP2RPM_PIP")]
    pub pip: Option<String>,

    /// Python interpreter that runs each setup.py
    #[arg(long, value_name = "EXECUTABLE", env = "PIP2RPM_PYTHON")]
    pub python: Option<String>,

    /// Extra arguments passed to every pip download, whitespace separated
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub pip_args: Option<String>,

    /// Do not delete the staging directory
    #[arg(long)]
    pub keep_dir: bool,

    /// Continue when a package fails to build
    #[arg(long)]
    pub ignore_build_errors: bool,

    /// Do not delete a package's setup.cfg before building
    #[arg(long)]
    pub keep_setup_cfg: bool,

    /// Config file (default: config.toml in the pip2rpm config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory in which the staging directory is created
    #[arg(long, value_name = "DIR")]
    pub staging_root: Option<PathBuf>,
}

impl Cli {
    /// Execute the run described by the flags
    pub async fn run(self) -> Result<()> {
        let input = self.input()?;
        let global = self.load_global_config()?;
        let mut config = self.run_config(input, &global)?;

        preflight::ensure_tools(&mut config)?;

        let runner = SystemRunner::new().with_poll_interval(config.poll_interval);
        let summary = Orchestrator::new(config, runner).run().await?;
        output::print_summary(&summary);
        Ok(())
    }

    /// The selected input mode
    pub fn input(&self) -> Result<InputSource, ConfigError> {
        match (&self.reqs, &self.setup) {
            (Some(reqs), _) => Ok(InputSource::Requirements(reqs.clone())),
            (None, Some(setup)) => Ok(InputSource::Project(setup.clone())),
            (None, None) => Err(ConfigError::MissingInput),
        }
    }

    fn load_global_config(&self) -> Result<GlobalConfig, ConfigError> {
        match &self.config {
            Some(path) if !path.exists() => Err(ConfigError::GlobalConfig {
                path: path.clone(),
                error: "file not found".to_string(),
            }),
            Some(path) => GlobalConfig::load_from_path(path),
            None => GlobalConfig::load(&Pip2RpmDirs::new()),
        }
    }

    /// Merge flags over the config file over built-in defaults
    pub fn run_config(
        &self,
        input: InputSource,
        global: &GlobalConfig,
    ) -> Result<RunConfig, ConfigError> {
        let output_dir = self.output.clone().ok_or(ConfigError::MissingOutput)?;
        let mut config = RunConfig::new(input, output_dir);

        config.staging_root.clone_from(&self.staging_root);
        config.keep_dir = self.keep_dir;

        let fetch = &mut config.fetch;
        fetch.pip = pick(&self.pip, &global.tools.pip).unwrap_or_else(|| DEFAULT_PIP.to_string());
        fetch.cache_dir = pick(&self.cache, &global.fetch.cache_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR));
        fetch.fast = self.fast || global.fetch.fast.unwrap_or(false);
        fetch.extra_args = self
            .pip_args
            .as_deref()
            .map(|a| a.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        let build = &mut config.build;
        build.python =
            pick(&self.python, &global.tools.python).unwrap_or_else(|| DEFAULT_PYTHON.to_string());
        build.skip = SkipSet::with_defaults()
            .extend_with(&global.build.skip)
            .extend_with(&self.skip);
        build.ignore_build_errors =
            self.ignore_build_errors || global.build.ignore_build_errors.unwrap_or(false);
        build.remove_setup_cfg =
            !(self.keep_setup_cfg || global.build.keep_setup_cfg.unwrap_or(false));
        build.metadata = BuildMetadata {
            packager: pick(&self.packager, &global.build.packager),
            vendor: pick(&self.vendor, &global.build.vendor),
            group: pick(&self.group, &global.build.group),
            release: pick(&self.release, &global.build.release),
        };

        Ok(config)
    }
}

/// Flag value if given, else the config file's
fn pick<T: Clone>(flag: &Option<T>, file: &Option<T>) -> Option<T> {
    flag.clone().or_else(|| file.clone())
}
