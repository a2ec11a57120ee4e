//! Output formatting
//!
//! User-facing messages go to stdout/stderr here; diagnostics go through
//! `tracing`. Quiet and JSON modes are process-wide switches set once in
//! `main`.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::core::orchestrator::RunSummary;
use crate::error::Pip2RpmError;

static QUIET: AtomicBool = AtomicBool::new(false);
static JSON: AtomicBool = AtomicBool::new(false);
static VERBOSITY: AtomicU8 = AtomicU8::new(0);

/// Output preferences from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub quiet: bool,
    pub json: bool,
    pub verbose: u8,
}

impl OutputConfig {
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self { quiet, json, verbose }
    }

    /// Make these preferences visible to the output helpers
    pub fn apply_global(self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
        JSON.store(self.json, Ordering::Relaxed);
        VERBOSITY.store(self.verbose, Ordering::Relaxed);
    }

    /// Default log filter directive for this verbosity
    pub fn log_level(self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn is_json() -> bool {
    JSON.load(Ordering::Relaxed)
}

pub fn verbosity() -> u8 {
    VERBOSITY.load(Ordering::Relaxed)
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

pub fn print_success(message: &str) {
    if !is_quiet() && !is_json() {
        println!("{} {message}", status::SUCCESS);
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet() && !is_json() {
        eprintln!("{} {message}", status::WARNING);
    }
}

pub fn print_info(message: &str) {
    if !is_quiet() && !is_json() {
        println!("{} {message}", status::INFO);
    }
}

/// Indented detail line under a status message
pub fn print_detail(message: &str) {
    if !is_quiet() && !is_json() {
        println!("  {message}");
    }
}

/// Report a finished run
pub fn print_summary(summary: &RunSummary) {
    if is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(summary).unwrap_or_default()
        );
        return;
    }

    print_success("Build complete!");
    print_detail(&format!("Downloaded: {}", summary.downloads));
    print_detail(&format!("Staging directories: {}", summary.staging_entries));
    print_detail(&format!("Packages built: {}", summary.projects_built.len()));
    if !summary.projects_skipped.is_empty() {
        print_detail(&format!("Skipped: {}", summary.projects_skipped.join(", ")));
    }
    print_detail(&format!(
        "RPMs produced: {} ({} files in output directory)",
        summary.artifacts_collected, summary.artifacts_total
    ));
    if !summary.projects_failed.is_empty() {
        print_warning(&format!(
            "Failed to build: {}",
            summary.projects_failed.join(", ")
        ));
    }
    if summary.staging_kept {
        print_info(&format!(
            "Staging directory kept at {}",
            summary.staging_dir.display()
        ));
    }
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error}", status::ERROR);
    if verbosity() > 0 {
        for cause in error.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
    }
}

/// Process exit status for an error that ended the run
///
/// Configuration and other errors exit with 1.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<Pip2RpmError>()
        .map_or(1, Pip2RpmError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BuildError, ConfigError};

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(OutputConfig::new(false, false, 0).log_level(), tracing::Level::WARN);
        assert_eq!(OutputConfig::new(false, false, 1).log_level(), tracing::Level::INFO);
        assert_eq!(OutputConfig::new(false, false, 3).log_level(), tracing::Level::DEBUG);
        assert_eq!(OutputConfig::new(true, false, 2).log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_exit_code_of_wrapped_errors() {
        let build = anyhow::Error::from(Pip2RpmError::from(BuildError::BuildFailed {
            package: "six".to_string(),
            code: 7,
            stderr: String::new(),
        }));
        assert_eq!(exit_code(&build), 7);

        let config = anyhow::Error::from(ConfigError::MissingInput);
        assert_eq!(exit_code(&config), 1);
    }
}
