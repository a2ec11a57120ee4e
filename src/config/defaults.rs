//! Default configuration values

use std::time::Duration;

/// Shared download cache used when none is configured
pub const DEFAULT_CACHE_DIR: &str = "/tmp/pip2rpm-cache";

/// Packages that are never rebuilt
pub const DEFAULT_SKIP_PACKAGES: &[&str] = &["setuptools", "pip", "wheel", "distribute"];

/// Downloader executable
pub const DEFAULT_PIP: &str = "pip";

/// Interpreter fallback when the running interpreter cannot be determined
pub const DEFAULT_PYTHON: &str = "python3";

/// Interval between child process exit checks
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Prefix of the per-run staging directory
pub const STAGING_PREFIX: &str = "pip2rpm-";

/// Build script looked for one level below the staging directory
pub const BUILD_DESCRIPTOR: &str = "setup.py";

/// Per-project config file removed before building unless kept
pub const SETUP_CFG: &str = "setup.cfg";

/// Directory the build tool writes artifacts into, relative to the project
pub const DIST_DIR: &str = "dist";

/// Artifact file suffix
pub const RPM_SUFFIX: &str = ".rpm";

/// Global config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";
