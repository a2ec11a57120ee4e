//! Error types for pip2rpm
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors, raised before any resource is created
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither a requirements list nor a setup script was given
    #[error("No input given. Pass --reqs <file> or --setup <path>")]
    MissingInput,

    /// No output directory was given
    #[error("No output directory given. Pass --output <dir>")]
    MissingOutput,

    /// Requirements file could not be read
    #[error("Failed to read requirements file '{path}': {error}")]
    RequirementsUnreadable { path: PathBuf, error: String },

    /// Setup script or project directory does not exist
    #[error("Project path not found: {path}")]
    ProjectNotFound { path: PathBuf },

    /// External tool not resolvable
    #[error("Tool '{tool}' not found. {hint}")]
    ToolNotFound { tool: String, hint: String },

    /// Global config file could not be read or parsed
    #[error("Invalid config file '{path}': {error}")]
    GlobalConfig { path: PathBuf, error: String },
}

/// Child process errors (launch and wait, never exit status)
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Process could not be started
    #[error("Failed to execute '{program}': {error}. Is it installed?")]
    Spawn { program: String, error: String },

    /// Waiting on the process failed
    #[error("Failed waiting for '{program}': {error}")]
    Wait { program: String, error: String },

    /// Captured output could not be read
    #[error("Failed to read output of '{program}': {error}")]
    Output { program: String, error: String },
}

/// Source download errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// Downloader exited nonzero
    #[error("{tool} failed for '{target}' (exit code {code}){}", stderr_suffix(.stderr))]
    DownloaderFailed {
        tool: String,
        target: String,
        code: i32,
        stderr: String,
    },

    /// Downloader could not be run
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Staging directory could not be inspected
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Archive extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Extraction tool exited nonzero
    #[error("{tool} failed on '{archive}' (exit code {code}){}", stderr_suffix(.stderr))]
    ToolFailed {
        tool: String,
        archive: PathBuf,
        code: i32,
        stderr: String,
    },

    /// Extraction tool could not be run
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Archive listing or removal failed
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Package build errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// Build command exited nonzero
    #[error("Build failed for package '{package}' (exit code {code}){}", stderr_suffix(.stderr))]
    BuildFailed {
        package: String,
        code: i32,
        stderr: String,
    },

    /// Build command could not be run
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Discovery, setup.cfg removal or artifact copy failed
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to read directory
    #[error("Failed to read directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },

    /// Failed to remove file
    #[error("Failed to remove file '{path}': {error}")]
    RemoveFile { path: PathBuf, error: String },

    /// Failed to copy file
    #[error("Failed to copy '{file}' to '{dest}': {error}")]
    Copy {
        file: PathBuf,
        dest: PathBuf,
        error: String,
    },

    /// Failed to resolve a path
    #[error("Failed to resolve path '{path}': {error}")]
    Canonicalize { path: PathBuf, error: String },
}

/// Top-level pip2rpm error type
#[derive(Error, Debug)]
pub enum Pip2RpmError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fetch error
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Extraction error
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Build error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}

impl Pip2RpmError {
    /// Process exit status that reflects this failure
    ///
    /// Configuration errors exit with 1. Tool failures propagate the child's
    /// exit code when it fits in a process status, and fall back to 1.
    pub fn exit_code(&self) -> i32 {
        let child = match self {
            Self::Fetch(FetchError::DownloaderFailed { code, .. })
            | Self::Extract(ExtractError::ToolFailed { code, .. })
            | Self::Build(BuildError::BuildFailed { code, .. }) => Some(*code),
            _ => None,
        };
        match child {
            Some(code) if (1..=255).contains(&code) => code,
            _ => 1,
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{stderr}")
    }
}
