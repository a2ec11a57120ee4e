//! RPM builds of downloaded projects
//!
//! Each project found one level below the staging directory is built with
//! `setup.py bdist_rpm` and its RPMs are collected into the output directory
//! straight afterwards, so artifacts of earlier projects survive a later
//! project's failure.

use std::path::Path;

use crate::config::defaults::{DIST_DIR, RPM_SUFFIX, SETUP_CFG};
use crate::core::project::{self, DiscoveredProject};
use crate::core::run_config::BuildOptions;
use crate::error::BuildError;
use crate::infra::filesystem;
use crate::infra::process::{Invocation, ProcessRunner};

/// What a build pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Subdirectories present in the staging directory
    pub staging_entries: usize,
    /// Projects with a `setup.py`
    pub projects_found: usize,
    /// Projects whose build succeeded
    pub built: Vec<String>,
    /// Projects passed over because of the skip set
    pub skipped: Vec<String>,
    /// Projects whose build failed while build errors were ignored
    pub failed: Vec<String>,
    /// RPMs copied into the output directory by this pass
    pub artifacts_collected: usize,
    /// Files now in the output directory, including earlier runs
    pub artifacts_total: usize,
}

/// Builds and collects every project in a staging directory
pub struct PackageBuilder<'a, R> {
    runner: &'a R,
    options: &'a BuildOptions,
}

impl<'a, R: ProcessRunner> PackageBuilder<'a, R> {
    pub fn new(runner: &'a R, options: &'a BuildOptions) -> Self {
        Self { runner, options }
    }

    /// Build every project found in `staging`, one at a time
    pub async fn build_all(
        &self,
        staging: &Path,
        output_dir: &Path,
    ) -> Result<BuildReport, BuildError> {
        filesystem::create_dir_all(output_dir)?;

        let projects = project::discover(staging)?;
        let mut report = BuildReport {
            staging_entries: filesystem::count_subdirs(staging)?,
            projects_found: projects.len(),
            ..BuildReport::default()
        };

        tracing::debug!(
            "Skip list: {}",
            self.options.skip.names().collect::<Vec<_>>().join(", ")
        );

        for project in &projects {
            if self.options.skip.contains(&project.name) {
                tracing::info!("Skipping {} (in skip list)", project.name);
                report.skipped.push(project.name.clone());
                continue;
            }

            let result = self.build(project).await;
            match result {
                Ok(()) => report.built.push(project.name.clone()),
                Err(BuildError::BuildFailed { code, .. }) if self.options.ignore_build_errors => {
                    tracing::warn!(
                        "Build failed for {} (exit code {code}), continuing",
                        project.name
                    );
                    report.failed.push(project.name.clone());
                }
                Err(e) => {
                    tracing::error!("{e}");
                    return Err(e);
                }
            }

            report.artifacts_collected += self.collect(project, output_dir)?;
        }

        report.artifacts_total = filesystem::count_files(output_dir)?;
        Ok(report)
    }

    /// Run `setup.py bdist_rpm` for one project
    ///
    /// Output streams straight to the console, so a failure carries no
    /// captured stderr.
    pub async fn build(&self, project: &DiscoveredProject) -> Result<(), BuildError> {
        if self.options.remove_setup_cfg {
            let cfg = project.dir.join(SETUP_CFG);
            if cfg.is_file() {
                tracing::debug!("Removing {}", cfg.display());
                filesystem::remove_file(&cfg)?;
            }
        }

        tracing::info!("Building {}", project.name);
        let output = self.runner.run(&self.invocation(project)).await?;
        if output.success() {
            Ok(())
        } else {
            Err(BuildError::BuildFailed {
                package: project.name.clone(),
                code: output.code,
                stderr: output.stderr,
            })
        }
    }

    /// Copy the project's RPMs from its `dist` directory into `output_dir`
    pub fn collect(
        &self,
        project: &DiscoveredProject,
        output_dir: &Path,
    ) -> Result<usize, BuildError> {
        let rpms = filesystem::files_with_suffix(&project.dir.join(DIST_DIR), RPM_SUFFIX)?;
        for rpm in &rpms {
            let dest = filesystem::copy_into(rpm, output_dir)?;
            tracing::info!("Collected {}", dest.display());
        }
        Ok(rpms.len())
    }

    fn invocation(&self, project: &DiscoveredProject) -> Invocation {
        Invocation::new(&self.options.python)
            .arg_path(&project.descriptor)
            .args(["-q", "bdist_rpm", "--binary-only", "--python"])
            .arg(&self.options.python)
            .args(["--dist-dir", DIST_DIR])
            .args(self.options.metadata.to_args())
            .dir(&project.dir)
            .inherit_stdio()
    }
}
