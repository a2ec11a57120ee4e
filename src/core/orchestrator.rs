//! Run orchestration
//!
//! One run is a straight line: create staging → fetch → expand → build each
//! → report → cleanup. The staging directory is a [`tempfile::TempDir`], so it
//! is removed on every exit path (success, error or panic) unless the run was
//! configured to keep it.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempDir;

use crate::config::defaults::STAGING_PREFIX;
use crate::core::requirements;
use crate::core::run_config::{InputSource, RunConfig};
use crate::error::{ConfigError, FilesystemError, Pip2RpmError};
use crate::infra::archive::ArchiveExpander;
use crate::infra::builder::{BuildReport, PackageBuilder};
use crate::infra::fetch::SourceFetcher;
use crate::infra::filesystem;
use crate::infra::process::ProcessRunner;

/// Aggregate counts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Downloads performed, or staging entries after a project-mode fetch
    pub downloads: usize,
    /// Subdirectories in the staging directory after expansion
    pub staging_entries: usize,
    /// Projects with a `setup.py`
    pub projects_found: usize,
    pub projects_built: Vec<String>,
    pub projects_skipped: Vec<String>,
    /// Failed builds tolerated because build errors were ignored
    pub projects_failed: Vec<String>,
    /// RPMs copied into the output directory by this run
    pub artifacts_collected: usize,
    /// Files in the output directory, including earlier runs
    pub artifacts_total: usize,
    pub staging_dir: PathBuf,
    pub staging_kept: bool,
}

impl RunSummary {
    fn from_report(downloads: usize, report: BuildReport) -> Self {
        Self {
            downloads,
            staging_entries: report.staging_entries,
            projects_found: report.projects_found,
            projects_built: report.built,
            projects_skipped: report.skipped,
            projects_failed: report.failed,
            artifacts_collected: report.artifacts_collected,
            artifacts_total: report.artifacts_total,
            ..Self::default()
        }
    }
}

/// Sequences fetching, expansion and building for one configuration
pub struct Orchestrator<R> {
    config: RunConfig,
    runner: R,
}

/// Input read before the staging directory exists
enum PreparedInput {
    Lines(Vec<String>),
    Project(PathBuf),
}

impl<R: ProcessRunner> Orchestrator<R> {
    pub fn new(config: RunConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Execute the whole pipeline
    ///
    /// Input problems are reported before any directory is created.
    pub async fn run(&self) -> Result<RunSummary, Pip2RpmError> {
        let input = self.prepare_input()?;
        filesystem::create_dir_all(&self.config.output_dir)?;

        let staging = self.create_staging()?;
        let staging_dir = staging.path().to_path_buf();
        tracing::info!("Staging directory: {}", staging_dir.display());

        let result = self.run_staged(&input, &staging_dir).await;

        if self.config.keep_dir {
            tracing::info!("Keeping staging directory {}", staging_dir.display());
        } else {
            tracing::debug!("Removing staging directory {}", staging_dir.display());
        }
        drop(staging);

        let mut summary = result?;
        summary.staging_dir = staging_dir;
        summary.staging_kept = self.config.keep_dir;
        Ok(summary)
    }

    async fn run_staged(
        &self,
        input: &PreparedInput,
        staging: &Path,
    ) -> Result<RunSummary, Pip2RpmError> {
        let fetcher = SourceFetcher::new(&self.runner, &self.config.fetch);
        let downloads = match input {
            PreparedInput::Lines(lines) => fetcher.fetch_requirements(lines, staging).await?,
            PreparedInput::Project(path) => fetcher.fetch_project(path, staging).await?,
        };

        ArchiveExpander::new(&self.runner).expand_all(staging).await?;

        let report = PackageBuilder::new(&self.runner, &self.config.build)
            .build_all(staging, &self.config.output_dir)
            .await?;

        let summary = RunSummary::from_report(downloads, report);
        tracing::info!(
            "Downloaded {} packages ({} directories), built {}, produced {} RPMs ({} in {})",
            summary.downloads,
            summary.staging_entries,
            summary.projects_built.len(),
            summary.artifacts_collected,
            summary.artifacts_total,
            self.config.output_dir.display()
        );
        Ok(summary)
    }

    fn prepare_input(&self) -> Result<PreparedInput, ConfigError> {
        match &self.config.input {
            InputSource::Requirements(path) => {
                requirements::read_lines(path).map(PreparedInput::Lines)
            }
            InputSource::Project(path) if path.exists() => Ok(PreparedInput::Project(path.clone())),
            InputSource::Project(path) => Err(ConfigError::ProjectNotFound { path: path.clone() }),
        }
    }

    fn create_staging(&self) -> Result<TempDir, FilesystemError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX).keep(self.config.keep_dir);

        let root = self
            .config
            .staging_root
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        filesystem::create_dir_all(&root)?;
        builder
            .tempdir_in(&root)
            .map_err(|e| FilesystemError::CreateDir {
                path: root,
                error: e.to_string(),
            })
    }
}
