//! Archive expansion in the staging directory
//!
//! The downloader leaves source distributions as archives. Each one directly
//! inside the directory is unpacked in place by its external tool and then
//! deleted, so running expansion again finds nothing to do.

use std::path::Path;

use crate::error::ExtractError;
use crate::infra::filesystem;
use crate::infra::process::{Invocation, ProcessRunner};

/// A supported archive format and how to unpack it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// `*.tar.gz`, unpacked with `tar -xzf`
    TarGz,
    /// `*.zip`, unpacked with `unzip -q -o`
    Zip,
}

impl ArchiveKind {
    /// Formats in the order they are expanded
    pub const ALL: [ArchiveKind; 2] = [ArchiveKind::TarGz, ArchiveKind::Zip];

    /// File name suffix this format is recognised by
    pub fn suffix(self) -> &'static str {
        match self {
            ArchiveKind::TarGz => ".tar.gz",
            ArchiveKind::Zip => ".zip",
        }
    }

    /// Extraction tool
    pub fn tool(self) -> &'static str {
        match self {
            ArchiveKind::TarGz => "tar",
            ArchiveKind::Zip => "unzip",
        }
    }

    /// Command that unpacks `archive` into the working directory
    pub fn invocation(self, archive: &Path, dir: &Path) -> Invocation {
        let inv = match self {
            ArchiveKind::TarGz => Invocation::new(self.tool()).arg("-xzf"),
            ArchiveKind::Zip => Invocation::new(self.tool()).args(["-q", "-o"]),
        };
        inv.arg_path(archive).dir(dir)
    }
}

/// Unpacks every known archive in a directory
pub struct ArchiveExpander<'a, R> {
    runner: &'a R,
}

impl<'a, R: ProcessRunner> ArchiveExpander<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Expand all archives directly inside `dir`, deleting each afterwards
    ///
    /// Returns the number of archives expanded.
    pub async fn expand_all(&self, dir: &Path) -> Result<usize, ExtractError> {
        let mut expanded = 0;

        for kind in ArchiveKind::ALL {
            for archive in filesystem::files_with_suffix(dir, kind.suffix())? {
                tracing::info!("Extracting {}", archive.display());
                let output = self.runner.run(&kind.invocation(&archive, dir)).await?;

                if !output.success() {
                    tracing::debug!("{} stderr: {}", kind.tool(), output.stderr_trimmed());
                    tracing::error!(
                        "{} failed on {} (exit code {})",
                        kind.tool(),
                        archive.display(),
                        output.code
                    );
                    return Err(ExtractError::ToolFailed {
                        tool: kind.tool().to_string(),
                        archive,
                        code: output.code,
                        stderr: output.stderr,
                    });
                }

                filesystem::remove_file(&archive)?;
                expanded += 1;
            }
        }

        tracing::debug!("Expanded {expanded} archives in {}", dir.display());
        Ok(expanded)
    }
}
