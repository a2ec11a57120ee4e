//! Infrastructure layer
//!
//! Handles all I/O operations: external processes, archives and the filesystem.

pub mod archive;
pub mod builder;
pub mod dirs;
pub mod fetch;
pub mod filesystem;
pub mod process;
