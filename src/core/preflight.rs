//! Preflight checks
//!
//! Verifies the downloader and interpreter resolve before any directory is
//! created, so a missing tool fails fast with an install hint instead of
//! midway through a run.

use std::path::PathBuf;

use crate::core::run_config::RunConfig;
use crate::error::ConfigError;

/// Result of a single tool check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCheck {
    /// Tool as configured (bare name or path)
    pub name: String,
    /// Where it resolved to, if anywhere
    pub resolved: Option<PathBuf>,
    /// How to install it
    pub hint: &'static str,
}

/// Resolve a tool by name on `PATH` or as a path
pub fn check_tool(name: &str, hint: &'static str) -> ToolCheck {
    ToolCheck {
        name: name.to_string(),
        resolved: which::which(name).ok(),
        hint,
    }
}

const PIP_HINT: &str = "Install pip (e.g. 'dnf install python3-pip') or pass --pip";
const PYTHON_HINT: &str = "Install Python (e.g. 'dnf install python3') or pass --python";

/// Check every tool the run will need up front
pub fn run_preflight(config: &RunConfig) -> Vec<ToolCheck> {
    vec![
        check_tool(&config.fetch.pip, PIP_HINT),
        check_tool(&config.build.python, PYTHON_HINT),
    ]
}

/// Fail on the first tool that does not resolve, else pin each tool to the
/// absolute path it resolved to
///
/// Builds run inside each project directory, where a relative tool path from
/// the command line no longer points at the same file.
pub fn ensure_tools(config: &mut RunConfig) -> Result<(), ConfigError> {
    let pip = require(check_tool(&config.fetch.pip, PIP_HINT))?;
    let python = require(check_tool(&config.build.python, PYTHON_HINT))?;
    config.fetch.pip = pip.to_string_lossy().into_owned();
    config.build.python = python.to_string_lossy().into_owned();
    Ok(())
}

fn require(check: ToolCheck) -> Result<PathBuf, ConfigError> {
    match check.resolved {
        Some(path) => {
            let path = absolute(path);
            tracing::debug!("Found {} at {}", check.name, path.display());
            Ok(path)
        }
        None => Err(ConfigError::ToolNotFound {
            tool: check.name,
            hint: check.hint.to_string(),
        }),
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir().map_or_else(|_| path.clone(), |cwd| cwd.join(&path))
}
