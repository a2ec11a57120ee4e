//! pip2rpm - build RPM packages from Python dependencies
//!
//! Downloads source distributions with pip, unpacks them, and runs each
//! project's `setup.py bdist_rpm`, collecting the RPMs into one directory.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Run configuration, requirement parsing, discovery and orchestration
//! - [`infra`] - Infrastructure layer (child processes, archives, filesystem)
//! - [`config`] - Configuration defaults
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
