//! Application service — best-effort compression of the output directory.
//!
//! Strategies are tried in [`ARCHIVE_CHAIN`] order. A strategy that does not
//! apply to the platform is skipped; one that fails hands over to the next.
//! Nothing is verified after an archive is written.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use netdiag_common::{AttemptResult, Platform};

use crate::application::ports::{ArtifactStore, CommandRunner};
use crate::domain::error::RunError;

/// Timeout for each external archiver.
pub const ARCHIVE_TIMEOUT: Duration = Duration::from_secs(120);

/// One way of producing an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveStrategy {
    /// PowerShell `Compress-Archive` (Windows).
    NativeCompress,
    /// `zip -r` (POSIX).
    Zip,
    /// `tar -czf`, written next to the requested name as `.tar.gz`.
    TarCommand,
    /// In-process tar + gzip, same `.tar.gz` path.
    TarGzWriter,
}

/// Fixed priority order.
pub const ARCHIVE_CHAIN: &[ArchiveStrategy] = &[
    ArchiveStrategy::NativeCompress,
    ArchiveStrategy::Zip,
    ArchiveStrategy::TarCommand,
    ArchiveStrategy::TarGzWriter,
];

impl ArchiveStrategy {
    #[must_use]
    pub fn applies_to(self, platform: Platform) -> bool {
        match self {
            Self::NativeCompress => platform.is_windows(),
            Self::Zip => !platform.is_windows(),
            Self::TarCommand | Self::TarGzWriter => true,
        }
    }

    /// File this strategy writes when asked for `dest`.
    #[must_use]
    pub fn output_path(self, dest: &Path) -> PathBuf {
        match self {
            Self::NativeCompress | Self::Zip => dest.to_path_buf(),
            Self::TarCommand | Self::TarGzWriter => tar_gz_path(dest),
        }
    }
}

/// `<name>.zip` becomes `<name>.tar.gz`; other names get `.tar.gz` appended.
#[must_use]
pub fn tar_gz_path(dest: &Path) -> PathBuf {
    let raw = dest.as_os_str().to_string_lossy();
    let lower = raw.to_ascii_lowercase();
    if lower.ends_with(".zip") {
        PathBuf::from(format!("{}.tar.gz", &raw[..raw.len() - 4]))
    } else {
        PathBuf::from(format!("{raw}.tar.gz"))
    }
}

/// Timestamped archive file name: `<artifact>-2026-10-18T09-30-00-000Z.zip`.
#[must_use]
pub fn archive_file_name(artifact: &str, at: DateTime<Utc>) -> String {
    format!("{artifact}-{}.zip", at.format("%Y-%m-%dT%H-%M-%S-%3fZ"))
}

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReceipt {
    pub path: PathBuf,
    pub strategy: ArchiveStrategy,
}

/// Compresses a directory with the first strategy that works.
pub struct ArchiveExporter<'a, R, S> {
    runner: &'a R,
    store: &'a S,
    platform: Platform,
}

impl<'a, R, S> ArchiveExporter<'a, R, S>
where
    R: CommandRunner,
    S: ArtifactStore,
{
    #[must_use]
    pub fn new(runner: &'a R, store: &'a S, platform: Platform) -> Self {
        Self {
            runner,
            store,
            platform,
        }
    }

    /// Archive `source` as `dest` (or its `.tar.gz` sibling).
    ///
    /// # Errors
    ///
    /// Returns [`RunError::ArchiveExhausted`] when every applicable strategy failed.
    pub async fn export(&self, source: &Path, dest: &Path) -> Result<ArchiveReceipt, RunError> {
        let dest = std::path::absolute(dest).unwrap_or_else(|_| dest.to_path_buf());
        let mut failures = Vec::new();

        for strategy in ARCHIVE_CHAIN.iter().copied() {
            if !strategy.applies_to(self.platform) {
                tracing::debug!(?strategy, "archive strategy not available on this platform");
                continue;
            }
            let path = strategy.output_path(&dest);
            match self.try_strategy(strategy, source, &path).await {
                Ok(()) => {
                    tracing::debug!(?strategy, path = %path.display(), "archive written");
                    return Ok(ArchiveReceipt { path, strategy });
                }
                Err(message) => {
                    tracing::warn!(?strategy, %message, "archive strategy failed");
                    failures.push(format!("{strategy:?}: {message}"));
                }
            }
        }

        Err(RunError::ArchiveExhausted {
            dest,
            attempts: failures.join("; "),
        })
    }

    async fn try_strategy(
        &self,
        strategy: ArchiveStrategy,
        source: &Path,
        path: &Path,
    ) -> Result<(), String> {
        let source_str = source.display().to_string();
        let path_str = path.display().to_string();
        let result = match strategy {
            ArchiveStrategy::NativeCompress => {
                let command = format!(
                    "Compress-Archive -Path '{source_str}\\*' -DestinationPath '{path_str}' -Force"
                );
                self.runner
                    .run_with_timeout(
                        "powershell",
                        &["-NoProfile", "-Command", &command],
                        ARCHIVE_TIMEOUT,
                    )
                    .await
            }
            ArchiveStrategy::Zip => {
                self.runner
                    .run_in_dir("zip", &["-r", &path_str, "."], source, ARCHIVE_TIMEOUT)
                    .await
            }
            ArchiveStrategy::TarCommand => {
                self.runner
                    .run_with_timeout(
                        "tar",
                        &["-czf", &path_str, "-C", &source_str, "."],
                        ARCHIVE_TIMEOUT,
                    )
                    .await
            }
            ArchiveStrategy::TarGzWriter => {
                return self
                    .store
                    .write_tar_gz(source, path)
                    .map_err(|e| format!("{e:#}"));
            }
        };
        match result {
            AttemptResult::Success { .. } => Ok(()),
            failed => Err(failed.message().unwrap_or("unknown failure").to_string()),
        }
    }
}
