//! Core logic module
//!
//! Domain types and the run pipeline. Side effects are delegated to
//! [`crate::infra`].
//!
//! # Submodules
//!
//! - [`requirements`] - Requirements list parsing
//! - [`skip`] - Packages excluded from building
//! - [`project`] - Build candidate discovery and name derivation
//! - [`run_config`] - Configuration for one run
//! - [`global_config`] - Global configuration file
//! - [`preflight`] - External tool checks
//! - [`orchestrator`] - Fetch, expand, build and report

pub mod global_config;
pub mod orchestrator;
pub mod preflight;
pub mod project;
pub mod requirements;
pub mod run_config;
pub mod skip;
