//! Common test utilities and helpers
//!
//! Shared workspace setup for integration tests, plus stand-in `pip` and
//! `python` scripts so the binary can run without network or rpmbuild.

#![allow(dead_code)]

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Fake downloader
///
/// Writes `<name>-1.0.tar.gz` holding `<name>-1.0/setup.py` into the `-d`
/// directory. The name is the requirement up to its first specifier.
/// Requirements named `missing` fail with exit code 4.
pub const FAKE_PIP: &str = r#"#!/bin/sh
dest=""
req=""
while [ $# -gt 0 ]; do
    case "$1" in
        -d) dest="$2"; shift ;;
        *) req="$1" ;;
    esac
    shift
done
name=$(printf '%s' "$req" | sed 's/[=<>!~ ].*//')
if [ "$name" = "missing" ]; then
    echo "ERROR: No matching distribution found for $req" >&2
    exit 4
fi
work=$(mktemp -d)
mkdir -p "$work/$name-1.0"
echo "from setuptools import setup" > "$work/$name-1.0/setup.py"
echo "[metadata]" > "$work/$name-1.0/setup.cfg"
tar -czf "$dest/$name-1.0.tar.gz" -C "$work" "$name-1.0"
rm -rf "$work"
"#;

/// Fake interpreter running `setup.py bdist_rpm`
///
/// Drops `dist/<dir>-1.noarch.rpm` in the project directory. Projects named
/// `broken-*` fail with exit code 3, and a relative `--python` value fails
/// with exit code 5.
pub const FAKE_PYTHON: &str = r#"#!/bin/sh
prev=""
for arg in "$@"; do
    if [ "$prev" = "--python" ]; then
        case "$arg" in
            /*) ;;
            *) echo "error: interpreter '$arg' is not an absolute path" >&2; exit 5 ;;
        esac
    fi
    prev="$arg"
done
dir=$(basename "$PWD")
case "$dir" in
    broken-*) echo "error: bdist_rpm failed" >&2; exit 3 ;;
esac
mkdir -p dist
touch "dist/$dir-1.noarch.rpm"
"#;

/// Test workspace
///
/// A temporary directory holding the fake tools, a config directory, a
/// staging root and the output directory.
pub struct TestProject {
    /// Temporary directory for the test workspace
    pub dir: TempDir,
}

impl TestProject {
    /// Create a workspace with the fake tools installed
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        project.create_dir("config");
        project.create_dir("staging");
        project.create_dir("cache");
        project.write_script("bin/pip", FAKE_PIP);
        project.write_script("bin/python", FAKE_PYTHON);
        project
    }

    /// Get the path to the workspace directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the workspace
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the workspace
    pub fn create_dir(&self, name: &str) {
        std::fs::create_dir_all(self.dir.path().join(name)).expect("Failed to create directory");
    }

    /// Write an executable shell script
    pub fn write_script(&self, name: &str, content: &str) {
        self.create_file(name, content);
        make_executable(&self.dir.path().join(name));
    }

    /// Check if a file exists in the workspace
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Sorted file names inside a workspace directory
    pub fn list(&self, name: &str) -> Vec<String> {
        let dir = self.dir.path().join(name);
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Run pip2rpm wired to the fake tools and this workspace
    pub fn run(&self, args: &[&str]) -> Output {
        let root = self.path();
        self.run_with_tools(root.join("bin/pip"), root.join("bin/python"), args)
    }

    /// Run pip2rpm with explicit tool paths, from the workspace directory
    pub fn run_with_tools(
        &self,
        pip: impl AsRef<OsStr>,
        python: impl AsRef<OsStr>,
        args: &[&str],
    ) -> Output {
        let root = self.path();
        Command::new(env!("CARGO_BIN_EXE_pip2rpm"))
            .current_dir(&root)
            .env("PIP2RPM_CONFIG_DIR", root.join("config"))
            .env_remove("PIP2RPM_PIP")
            .env_remove("PIP2RPM_PYTHON")
            .env_remove("PIP2RPM_CACHE")
            .env_remove("RUST_LOG")
            .arg("--pip")
            .arg(pip)
            .arg("--python")
            .arg(python)
            .arg("--cache")
            .arg(root.join("cache"))
            .arg("--staging-root")
            .arg(root.join("staging"))
            .args(args)
            .output()
            .expect("Failed to execute pip2rpm")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to set permissions");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
