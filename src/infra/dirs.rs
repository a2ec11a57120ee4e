//! Platform-specific directory management
//!
//! Locates the configuration directory holding `config.toml`. Follows the XDG
//! Base Directory Specification on Linux and standard locations on macOS.
//!
//! `PIP2RPM_CONFIG_DIR` overrides the platform default.

use std::env;
use std::path::PathBuf;

use crate::config::defaults::CONFIG_FILE_NAME;

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "PIP2RPM_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "pip2rpm";

/// Platform-specific directory provider for pip2rpm
#[derive(Debug, Clone)]
pub struct Pip2RpmDirs {
    config_dir: PathBuf,
}

impl Pip2RpmDirs {
    /// Checks the environment first, then falls back to the platform default
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/pip2rpm` or `~/.config/pip2rpm`
    /// - macOS: `~/Library/Application Support/pip2rpm`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Path to `config.toml` in the config directory
    #[must_use]
    pub fn global_config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        Self::platform_config_dir()
    }

    fn platform_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for Pip2RpmDirs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_new_creates_instance() {
        let dirs = Pip2RpmDirs::new();
        assert!(!dirs.config_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_global_config_path_is_under_config_dir() {
        let dirs = Pip2RpmDirs::with_config_dir("/etc/pip2rpm");
        assert!(dirs.global_config_path().starts_with(dirs.config_dir()));
        assert!(dirs.global_config_path().ends_with("config.toml"));
    }
}
