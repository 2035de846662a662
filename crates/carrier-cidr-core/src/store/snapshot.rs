// # Per-Carrier Snapshots
//
// One file per carrier under a single directory, named by the carrier's
// short name and holding its canonical snapshot text.
//
// ## Layout
//
// ```text
// <dir>/docomo
// <dir>/ezweb
// <dir>/softbank
// ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReadDirStream;

use crate::carrier::CarrierRegistry;
use crate::cidr::{CidrSet, parse_snapshot, to_snapshot_text};
use crate::error::{Error, Result};
use crate::output::OutputBundle;
use crate::store::atomic::replace_if_changed;

/// Snapshot directory accessor
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot file for a carrier short name
    pub fn path_for(&self, short_name: &str) -> PathBuf {
        self.dir.join(short_name)
    }

    /// Read the committed snapshot
    ///
    /// Returns `Ok(None)` if the carrier has never been persisted.
    pub async fn read(&self, short_name: &str) -> Result<Option<CidrSet>> {
        read_snapshot_file(&self.path_for(short_name)).await
    }

    /// Atomically persist a canonical set if its bytes differ
    ///
    /// Returns whether the snapshot file was replaced.
    pub async fn commit(&self, short_name: &str, set: &CidrSet) -> Result<bool> {
        let text = to_snapshot_text(set);
        replace_if_changed(&self.path_for(short_name), text.as_bytes()).await
    }
}

async fn read_snapshot_file(path: &Path) -> Result<Option<CidrSet>> {
    match fs::read_to_string(path).await {
        Ok(text) => Ok(Some(parse_snapshot(&text))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Build an output bundle from every snapshot in `dir`
///
/// Only regular files named after a registered carrier are read. Anything
/// else (temp files, generator directories) is skipped. A snapshot that
/// cannot be read is logged and left out.
pub async fn load_bundle(dir: &Path, registry: &CarrierRegistry) -> Result<OutputBundle> {
    let entries = fs::read_dir(dir).await.map_err(|e| Error::io(dir, e))?;
    let mut stream = ReadDirStream::new(entries);
    let mut carriers = BTreeMap::new();

    while let Some(entry) = stream.next().await {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::debug!("Skipping non UTF-8 entry {}", path.display());
            continue;
        };

        if registry.carrier_id_of(&name).is_err() {
            tracing::debug!("Skipping {} (not a carrier snapshot)", path.display());
            continue;
        }

        // Follows symlinks, so a linked snapshot counts as a regular file
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => {
                tracing::debug!("Skipping {} (not a regular file)", path.display());
                continue;
            }
            Err(e) => {
                tracing::warn!("Cannot stat {}: {}", path.display(), e);
                continue;
            }
        }

        match read_snapshot_file(&path).await {
            Ok(Some(set)) => {
                tracing::debug!("Loaded {} entries for {}", set.len(), name);
                carriers.insert(name, set);
            }
            Ok(None) => {
                tracing::debug!("Snapshot {} vanished while loading", path.display());
            }
            Err(e) => {
                tracing::warn!("Leaving {} out of the bundle: {}", name, e);
            }
        }
    }

    Ok(OutputBundle::new(carriers))
}
