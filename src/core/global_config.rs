//! Global configuration management
//!
//! Reads defaults from `config.toml` in the config directory (or an explicit
//! path). Every setting is optional; command-line flags take precedence and
//! built-in defaults fill whatever neither provides.

use crate::error::ConfigError;
use crate::infra::dirs::Pip2RpmDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration for pip2rpm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// External tool executables
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Download settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

/// External tool executables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Downloader executable
    pub pip: Option<String>,

    /// Interpreter used to run `setup.py`
    pub python: Option<String>,
}

/// Download settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Shared download cache
    pub cache_dir: Option<PathBuf>,

    /// Resolve from the cache only
    pub fast: Option<bool>,
}

/// Build settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    pub packager: Option<String>,
    pub vendor: Option<String>,
    pub group: Option<String>,
    pub release: Option<String>,

    /// Extra package names never built, added to the built-in list
    #[serde(default)]
    pub skip: Vec<String>,

    /// Keep each project's `setup.cfg`
    pub keep_setup_cfg: Option<bool>,

    /// Continue past failed builds
    pub ignore_build_errors: Option<bool>,
}

impl GlobalConfig {
    /// Load global configuration from the config directory
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::GlobalConfig` if the file exists but cannot be
    /// read or is not valid TOML.
    pub fn load(dirs: &Pip2RpmDirs) -> Result<Self, ConfigError> {
        Self::load_from_path(&dirs.global_config_path())
    }

    /// Load global configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::GlobalConfig {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        tracing::debug!("Loaded config file {}", path.display());
        toml::from_str(&content).map_err(|e| ConfigError::GlobalConfig {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }
}
