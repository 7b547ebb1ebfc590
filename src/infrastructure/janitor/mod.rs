//! Age-based sweeping of ephemeral audio files.
//!
//! Only top-level regular files named with the ephemeral prefix are
//! candidates. Deletion is eventual: a file can outlive its max age by up to
//! one sweep interval, and a consumer still reading a file past that age
//! loses it.

use crate::infrastructure::repositories::EPHEMERAL_PREFIX;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, thiserror::Error)]
pub enum JanitorError {
    #[error("failed to list {}: {source}", .path.display())]
    ListDirectory { path: PathBuf, source: io::Error },
}

pub struct TempFileJanitor {
    directory: PathBuf,
    max_age: Duration,
}

impl TempFileJanitor {
    pub fn new(directory: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            directory: directory.into(),
            max_age,
        }
    }

    pub async fn cleanup(&self) -> Result<usize, JanitorError> {
        cleanup(&self.directory, self.max_age).await
    }

    /// Run `cleanup` every `interval` until the task is aborted
    pub fn spawn(self, interval: Duration) -> JoinHandle<()> {
        tracing::info!(
            directory = %self.directory.display(),
            interval_secs = interval.as_secs(),
            max_age_secs = self.max_age.as_secs(),
            "Started temp file cleanup task"
        );

        tokio::spawn(async move {
            // tokio rejects a zero period
            let mut ticker = tokio::time::interval(interval.max(Duration::from_secs(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match self.cleanup().await {
                    Ok(0) => tracing::debug!("No expired temp files"),
                    Ok(removed) => tracing::info!(removed = removed, "Removed expired temp files"),
                    Err(e) => tracing::error!(error = %e, "Failed to clean up temp files"),
                }
            }
        })
    }
}

/// Remove expired ephemeral files from `directory`, returning how many were deleted
pub async fn cleanup(directory: &Path, max_age: Duration) -> Result<usize, JanitorError> {
    cleanup_at(directory, max_age, SystemTime::now()).await
}

/// `cleanup` against an explicit notion of "now"
pub async fn cleanup_at(
    directory: &Path,
    max_age: Duration,
    now: SystemTime,
) -> Result<usize, JanitorError> {
    sweep(directory, max_age, now, fs::remove_file).await
}

/// Scan `directory` and hand each expired ephemeral file to `remove`.
/// A failed removal is logged and not counted; the scan carries on.
async fn sweep<F, Fut>(
    directory: &Path,
    max_age: Duration,
    now: SystemTime,
    remove: F,
) -> Result<usize, JanitorError>
where
    F: Fn(PathBuf) -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    let list_error = |source: io::Error| JanitorError::ListDirectory {
        path: directory.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(directory).await.map_err(list_error)?;
    let mut removed = 0;

    while let Some(entry) = entries.next_entry().await.map_err(list_error)? {
        let is_ephemeral = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(EPHEMERAL_PREFIX));
        if !is_ephemeral {
            continue;
        }

        // Vanished entries and anything that is not a plain file are skipped
        let metadata = match entry.metadata().await {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => continue,
        };
        let Ok(modified) = metadata.modified() else {
            continue;
        };

        // Timestamps in the future count as fresh
        let age = now.duration_since(modified).unwrap_or_default();
        if age <= max_age {
            continue;
        }

        let path = entry.path();
        match remove(path.clone()).await {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(file = %path.display(), "Temp file already removed");
            }
            Err(e) => {
                tracing::warn!(
                    file = %path.display(),
                    error = %e,
                    "Failed to remove old temp file"
                );
            }
        }
    }

    Ok(removed)
}
