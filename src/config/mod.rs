//! Configuration and constants
//!
//! Compile-time defaults. Runtime configuration lives in
//! [`crate::core::run_config::RunConfig`], which is seeded from these values.

pub mod defaults;
