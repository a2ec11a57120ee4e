//! Source downloads
//!
//! Populates the staging directory with source distributions using `pip
//! download`. Dependency resolution is left entirely to pip. A single failed
//! download fails the whole fetch: a partial dependency set is no use to the
//! build step.

use std::path::{Path, PathBuf};

use crate::core::requirements;
use crate::core::run_config::FetchOptions;
use crate::error::FetchError;
use crate::infra::filesystem;
use crate::infra::process::{Invocation, ProcessRunner};

/// Drives the downloader into a staging directory
pub struct SourceFetcher<'a, R> {
    runner: &'a R,
    options: &'a FetchOptions,
}

impl<'a, R: ProcessRunner> SourceFetcher<'a, R> {
    pub fn new(runner: &'a R, options: &'a FetchOptions) -> Self {
        Self { runner, options }
    }

    /// Download every dependency named in `lines`, one downloader run each
    ///
    /// Blank and comment lines are skipped. Returns the number of downloads
    /// performed.
    pub async fn fetch_requirements<I, S>(
        &self,
        lines: I,
        staging: &Path,
    ) -> Result<usize, FetchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let deps = requirements::parse_lines(lines);

        for dep in &deps {
            tracing::info!("Downloading {dep}");
            let inv = self.base_invocation(staging).arg(dep.as_str());
            self.run_checked(&inv, dep.as_str()).await?;
        }

        Ok(deps.len())
    }

    /// Download a local project's dependencies in editable mode
    ///
    /// `project` may name the `setup.py` itself or its directory. Returns the
    /// number of entries now in the staging directory, a rough progress
    /// signal rather than a dependency count.
    pub async fn fetch_project(&self, project: &Path, staging: &Path) -> Result<usize, FetchError> {
        let project_dir = project_dir(project)?;
        tracing::info!("Downloading dependencies of {}", project_dir.display());

        let inv = self
            .base_invocation(staging)
            .arg("--src")
            .arg_path(staging)
            .arg("-e")
            .arg_path(&project_dir);
        self.run_checked(&inv, &project_dir.to_string_lossy()).await?;

        Ok(filesystem::count_entries(staging)?)
    }

    fn base_invocation(&self, staging: &Path) -> Invocation {
        let opts = self.options;
        let mut inv = Invocation::new(&opts.pip)
            .args(["download", "--no-binary", ":all:", "-d"])
            .arg_path(staging)
            .arg("--cache-dir")
            .arg_path(&opts.cache_dir);
        if opts.fast {
            inv = inv
                .args(["--no-index", "--find-links"])
                .arg_path(&opts.cache_dir);
        }
        inv.args(opts.extra_args.iter().cloned())
    }

    async fn run_checked(&self, inv: &Invocation, target: &str) -> Result<(), FetchError> {
        let output = self.runner.run(inv).await?;
        if output.success() {
            return Ok(());
        }
        tracing::error!(
            "{} failed for {target} (exit code {})",
            self.options.pip,
            output.code
        );
        Err(FetchError::DownloaderFailed {
            tool: self.options.pip.clone(),
            target: target.to_string(),
            code: output.code,
            stderr: output.stderr,
        })
    }
}

/// Absolute project directory for a `setup.py` path or a directory path
fn project_dir(project: &Path) -> Result<PathBuf, FetchError> {
    let absolute = filesystem::canonicalize(project)?;
    if absolute.is_file() {
        Ok(absolute
            .parent()
            .map_or_else(|| absolute.clone(), Path::to_path_buf))
    } else {
        Ok(absolute)
    }
}
