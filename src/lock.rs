//! Exclusive lock held for the duration of a pass, so two invocations never
//! race on the watermark or create duplicate records.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// A lock guard that releases the lock when dropped
pub struct PassLock {
    _file: File,
}

fn lock_path() -> Result<PathBuf> {
    let runtime_dir = dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .context("Could not determine runtime directory")?;

    Ok(runtime_dir.join("gcal-notion").join("sync.lock"))
}

/// Acquire the pass lock, failing if another pass is running
pub fn acquire() -> Result<PassLock> {
    acquire_at(&lock_path()?)
}

pub fn acquire_at(path: &Path) -> Result<PassLock> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Failed to create lock directory")?;
    }
    let file = File::create(path).context("Failed to create lock file")?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another gcal-notion pass is already running.\n\
            If you believe this is an error, remove: {}",
            path.display()
        )
    })?;

    Ok(PassLock { _file: file })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_first_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sync.lock");

        let first = acquire_at(&path).unwrap();
        assert!(acquire_at(&path).is_err());

        drop(first);
        assert!(acquire_at(&path).is_ok());
    }
}
