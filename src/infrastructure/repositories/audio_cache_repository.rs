//! On-disk audio cache.
//!
//! The cache directory holds one file per key, `<hexkey>.mp3`. Entries are
//! immutable: a write lands in a uniquely named staging file and is then
//! linked into place without clobbering, so readers never observe a partial
//! entry and a concurrent second writer becomes a no-op.
//!
//! The scratch directory (which may be the cache directory) holds ephemeral
//! `temp_<name>_<random>.mp3` files handed to delivery channels, one per
//! call. Those are swept by the janitor, never by this repository.

use crate::domain::tts::CacheKey;
use bytes::Bytes;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use tokio::fs;

pub const AUDIO_EXTENSION: &str = "mp3";

/// Name prefix marking a file as eligible for age-based deletion
pub const EPHEMERAL_PREFIX: &str = "temp_";

/// Prefix of in-progress writes; never served and never swept
const STAGING_PREFIX: &str = ".partial-";

const MAX_SUGGESTED_NAME_CHARS: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to prepare directory {}: {source}", .path.display())]
    Setup { path: PathBuf, source: io::Error },
    #[error("failed to read cache entry {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write cache entry {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to stage audio file {}: {source}", .path.display())]
    Stage { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Created,
    /// An entry for the key was already there; nothing was written
    AlreadyPresent,
}

pub struct AudioCacheRepository {
    cache_dir: PathBuf,
    scratch_dir: PathBuf,
}

impl AudioCacheRepository {
    /// Open the cache, creating both directories if needed
    pub async fn open(
        cache_dir: impl Into<PathBuf>,
        scratch_dir: impl Into<PathBuf>,
    ) -> Result<Self, CacheError> {
        let cache_dir = cache_dir.into();
        let scratch_dir = scratch_dir.into();

        for dir in [&cache_dir, &scratch_dir] {
            fs::create_dir_all(dir)
                .await
                .map_err(|source| CacheError::Setup {
                    path: dir.clone(),
                    source,
                })?;
        }

        Ok(Self {
            cache_dir,
            scratch_dir,
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(format!("{}.{}", key, AUDIO_EXTENSION))
    }

    /// Read the entry for `key`.
    ///
    /// `Ok(None)` only when no entry exists; any other I/O failure is an error
    /// so that a broken cache is not mistaken for a cold one.
    pub async fn lookup(&self, key: &CacheKey) -> Result<Option<Bytes>, CacheError> {
        let path = self.entry_path(key);
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::Read { path, source }),
        }
    }

    pub async fn exists(&self, key: &CacheKey) -> Result<bool, CacheError> {
        let path = self.entry_path(key);
        fs::try_exists(&path)
            .await
            .map_err(|source| CacheError::Read { path, source })
    }

    /// Persist `audio` under `key` unless an entry is already present.
    pub async fn store(&self, key: &CacheKey, audio: Bytes) -> Result<StoreOutcome, CacheError> {
        if self.exists(key).await? {
            return Ok(StoreOutcome::AlreadyPresent);
        }

        let dir = self.cache_dir.clone();
        let target = self.entry_path(key);
        let path = target.clone();

        tokio::task::spawn_blocking(move || write_new_entry(&dir, &target, &audio))
            .await
            .map_err(|e| CacheError::Write {
                path,
                source: io::Error::new(io::ErrorKind::Other, e),
            })?
    }

    /// Write `audio` to a fresh ephemeral file in the scratch directory.
    ///
    /// The file name is `temp_<suggested_name>_<random>.mp3` with the
    /// suggested name reduced to filename-safe characters. Every call creates
    /// its own file, so concurrent callers never share or replace a path.
    pub async fn materialize_temp(
        &self,
        audio: Bytes,
        suggested_name: &str,
    ) -> Result<PathBuf, CacheError> {
        let dir = self.scratch_dir.clone();
        let prefix = ephemeral_file_prefix(suggested_name);

        let staged = tokio::task::spawn_blocking(move || -> io::Result<PathBuf> {
            let mut file = Builder::new()
                .prefix(&prefix)
                .suffix(&format!(".{}", AUDIO_EXTENSION))
                .tempfile_in(&dir)?;
            file.write_all(&audio)?;
            file.as_file().sync_all()?;
            let (_, path) = file.keep().map_err(|e| e.error)?;
            Ok(path)
        })
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
        .and_then(|result| result);

        staged.map_err(|source| CacheError::Stage {
            path: self.scratch_dir.clone(),
            source,
        })
    }

    /// Both directories exist and are directories
    pub async fn check_ready(&self) -> bool {
        for dir in [&self.cache_dir, &self.scratch_dir] {
            match fs::metadata(dir).await {
                Ok(metadata) if metadata.is_dir() => {}
                _ => return false,
            }
        }
        true
    }
}

fn write_new_entry(dir: &Path, target: &Path, audio: &[u8]) -> Result<StoreOutcome, CacheError> {
    let write_error = |source: io::Error| CacheError::Write {
        path: target.to_path_buf(),
        source,
    };

    let staged = stage_in(dir, audio).map_err(write_error)?;

    // Dropping the PersistError removes the staging file
    match staged.persist_noclobber(target) {
        Ok(_) => Ok(StoreOutcome::Created),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(StoreOutcome::AlreadyPresent),
        Err(e) => Err(write_error(e.error)),
    }
}

fn stage_in(dir: &Path, data: &[u8]) -> io::Result<NamedTempFile> {
    let mut file = Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    Ok(file)
}

fn ephemeral_file_prefix(suggested_name: &str) -> String {
    let mut name: String = suggested_name
        .trim()
        .chars()
        .take(MAX_SUGGESTED_NAME_CHARS)
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.is_empty() {
        name.push_str("audio");
    }

    format!("{}{}_", EPHEMERAL_PREFIX, name)
}
