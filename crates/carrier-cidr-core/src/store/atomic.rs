// # Atomic Replace
//
// Write-to-temp-then-rename file replacement, gated by a content hash.
//
// ## Protocol
//
// 1. Write the new bytes to `<target>.tmp`, flush and sync
// 2. Changed = target absent, or SHA-256(target) != SHA-256(temp)
// 3. Changed: rename temp over target. Unchanged: delete temp
//
// ## Crash Behavior
//
// - The target is only ever touched by `rename`, so readers see either the
//   previous committed bytes or the new ones, never a partial write
// - A crash before the rename leaves the target stale, not corrupted
// - The temp file is removed on every early return (including a dropped
//   future) by a drop guard
//
// ## Change Semantics
//
// The comparison is over raw bytes. Any formatting difference counts as a
// change even if the entries are the same.

use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Replace `target` with `content` if the bytes differ
///
/// # Returns
///
/// - `Ok(true)`: the target was (re)written
/// - `Ok(false)`: the target already held exactly these bytes
/// - `Err(Error::Io)`: the target is left as it was
pub async fn replace_if_changed(target: &Path, content: &[u8]) -> Result<bool> {
    let temp = temp_path(target);
    let mut guard = TempFileGuard::new(&temp);

    write_temp(&temp, content).await?;

    let changed = has_changed(target, &temp).await?;

    if changed {
        fs::rename(&temp, target).await.map_err(|e| Error::io(target, e))?;
        tracing::trace!("Replaced {}", target.display());
    } else {
        fs::remove_file(&temp).await.map_err(|e| Error::io(&temp, e))?;
        tracing::trace!("Unchanged {}", target.display());
    }

    guard.disarm();
    Ok(changed)
}

/// Decide whether `temp` should replace `target`
pub async fn has_changed(target: &Path, temp: &Path) -> Result<bool> {
    let exists = fs::try_exists(target)
        .await
        .map_err(|e| Error::io(target, e))?;
    if !exists {
        return Ok(true);
    }

    Ok(file_digest(target).await? != file_digest(temp).await?)
}

/// Hex-encoded SHA-256 of a file's contents
pub async fn file_digest(path: &Path) -> Result<String> {
    let bytes = fs::read(path).await.map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Temp file used while replacing `target`: the target path plus `.tmp`
pub fn temp_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

async fn write_temp(temp: &Path, content: &[u8]) -> Result<()> {
    // The handle is dropped (closed) at the end of this scope on every path
    let mut file = fs::File::create(temp)
        .await
        .map_err(|e| Error::io(temp, e))?;

    file.write_all(content)
        .await
        .map_err(|e| Error::io(temp, e))?;

    file.flush().await.map_err(|e| Error::io(temp, e))?;
    file.sync_all().await.map_err(|e| Error::io(temp, e))?;

    Ok(())
}

/// Removes the temp file unless disarmed
struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if self.armed
            && let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!("Failed to remove temp file {}: {}", self.path.display(), e);
        }
    }
}
