//! Discovered build candidates
//!
//! After downloading and expanding, every directory directly inside the
//! staging directory that holds a `setup.py` is a project to build. Source
//! trees follow the `<name>-<version>` naming convention, so the package name
//! is everything before the last hyphen.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::defaults::BUILD_DESCRIPTOR;
use crate::error::FilesystemError;

/// A project found in the staging directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredProject {
    /// Project source tree
    pub dir: PathBuf,
    /// Path to its `setup.py`
    pub descriptor: PathBuf,
    /// Package name derived from the directory name
    pub name: String,
}

impl DiscoveredProject {
    /// Describe the project whose build script is `descriptor`
    pub fn from_descriptor(descriptor: PathBuf) -> Option<Self> {
        let dir = descriptor.parent()?.to_path_buf();
        let base = dir.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            name: derive_name(&base).to_string(),
            dir,
            descriptor,
        })
    }
}

/// Package name from a `<name>-<version>` directory name
///
/// Names without a hyphen are returned whole.
pub fn derive_name(dir_name: &str) -> &str {
    dir_name.rsplit_once('-').map_or(dir_name, |(name, _)| name)
}

/// Find `<staging>/*/setup.py`, ordered by path
///
/// Only one level is searched: the staging directory itself is never a
/// candidate, nor is anything nested deeper inside a source tree.
pub fn discover(staging: &Path) -> Result<Vec<DiscoveredProject>, FilesystemError> {
    let mut projects = Vec::new();
    let walker = WalkDir::new(staging)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| FilesystemError::ReadDir {
            path: staging.to_path_buf(),
            error: e.to_string(),
        })?;
        if entry.file_type().is_file() && entry.file_name() == BUILD_DESCRIPTOR {
            if let Some(project) = DiscoveredProject::from_descriptor(entry.into_path()) {
                projects.push(project);
            }
        }
    }

    Ok(projects)
}
