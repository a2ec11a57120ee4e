//! Filesystem operations
//!
//! Handles file and directory operations.

use std::path::{Path, PathBuf};

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a file
pub fn remove_file(path: &Path) -> Result<(), FilesystemError> {
    std::fs::remove_file(path).map_err(|e| FilesystemError::RemoveFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Regular files directly inside `dir` whose name ends with `suffix`, sorted
///
/// A missing directory has no matches.
pub fn files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, FilesystemError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut matches: Vec<PathBuf> = read_dir(dir)?
        .into_iter()
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .is_some_and(|n| n.to_string_lossy().ends_with(suffix))
        })
        .collect();
    matches.sort();
    Ok(matches)
}

/// Number of entries of any kind directly inside `dir`
pub fn count_entries(dir: &Path) -> Result<usize, FilesystemError> {
    Ok(read_dir(dir)?.len())
}

/// Number of regular files directly inside `dir`
pub fn count_files(dir: &Path) -> Result<usize, FilesystemError> {
    Ok(read_dir(dir)?.into_iter().filter(|p| p.is_file()).count())
}

/// Number of subdirectories directly inside `dir`
pub fn count_subdirs(dir: &Path) -> Result<usize, FilesystemError> {
    Ok(read_dir(dir)?.into_iter().filter(|p| p.is_dir()).count())
}

/// Copy `file` into `dir`, keeping its name; returns the destination
pub fn copy_into(file: &Path, dir: &Path) -> Result<PathBuf, FilesystemError> {
    let name = file.file_name().unwrap_or(file.as_os_str());
    let dest = dir.join(name);
    std::fs::copy(file, &dest).map_err(|e| FilesystemError::Copy {
        file: file.to_path_buf(),
        dest: dest.clone(),
        error: e.to_string(),
    })?;
    Ok(dest)
}

/// Absolute form of an existing path
pub fn canonicalize(path: &Path) -> Result<PathBuf, FilesystemError> {
    path.canonicalize()
        .map_err(|e| FilesystemError::Canonicalize {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
}

fn read_dir(dir: &Path) -> Result<Vec<PathBuf>, FilesystemError> {
    let err = |e: std::io::Error| FilesystemError::ReadDir {
        path: dir.to_path_buf(),
        error: e.to_string(),
    };
    std::fs::read_dir(dir)
        .map_err(err)?
        .map(|entry| entry.map(|e| e.path()).map_err(err))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_with_suffix_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.tar.gz"), "").unwrap();
        std::fs::write(dir.path().join("a.tar.gz"), "").unwrap();
        std::fs::write(dir.path().join("c.zip"), "").unwrap();
        std::fs::create_dir_all(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("d.tar.gz"), "").unwrap();

        let found = files_with_suffix(dir.path(), ".tar.gz").unwrap();
        assert_eq!(
            found,
            [dir.path().join("a.tar.gz"), dir.path().join("b.tar.gz")]
        );
    }

    #[test]
    fn test_files_with_suffix_missing_dir() {
        let found = files_with_suffix(Path::new("/nonexistent_dir_12345"), ".rpm").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_counts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("one-1.0")).unwrap();
        std::fs::create_dir_all(dir.path().join("two-2.0")).unwrap();
        std::fs::write(dir.path().join("three-3.0.zip"), "").unwrap();
        assert_eq!(count_entries(dir.path()).unwrap(), 3);
        assert_eq!(count_subdirs(dir.path()).unwrap(), 2);
        assert_eq!(count_files(dir.path()).unwrap(), 1);
    }

    #[test]
    fn test_copy_into_keeps_name() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let file = src.path().join("pkg-1.0-1.noarch.rpm");
        std::fs::write(&file, "rpm").unwrap();

        let copied = copy_into(&file, dst.path()).unwrap();
        assert_eq!(copied, dst.path().join("pkg-1.0-1.noarch.rpm"));
        assert_eq!(std::fs::read_to_string(copied).unwrap(), "rpm");
        assert!(file.exists());
    }
}
