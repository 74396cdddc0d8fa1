//! Durable snapshot storage.
//!
//! Snapshots are the unit of persistence: one pretty-printed JSON file per
//! capture, named by device, label, and capture timestamp. Diffs, graphs, and
//! reports are derived artifacts and are never persisted here.

use crate::error::{FabricError, Result};
use crate::model::Snapshot;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem-backed snapshot store.
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|err| FabricError::io(dir.clone(), err))?;
        Ok(Self { dir })
    }

    /// Directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a snapshot to disk and return the path handle.
    pub fn persist(&self, snapshot: &Snapshot) -> Result<PathBuf> {
        let path = self.snapshot_path(snapshot);
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, json).map_err(|err| FabricError::io(path.clone(), err))?;
        tracing::debug!(path = %path.display(), "snapshot persisted");
        Ok(path)
    }

    /// Load a snapshot from a path previously returned by [`persist`].
    ///
    /// Round-trips exactly: the loaded snapshot compares equal to the one
    /// persisted. Takes no store handle so callers can load snapshot files
    /// from anywhere.
    ///
    /// [`persist`]: SnapshotStore::persist
    pub fn load(path: &Path) -> Result<Snapshot> {
        let content = fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                FabricError::store(path, "snapshot file not found")
            } else {
                FabricError::io(path, err)
            }
        })?;
        serde_json::from_str(&content)
            .map_err(|err| FabricError::store(path, format!("corrupt snapshot file: {err}")))
    }

    /// Load the most recent snapshot for a device/label pair.
    pub fn load_latest(&self, device: &str, label: &str) -> Result<Snapshot> {
        let prefix = format!("{}_{}_", sanitize(device), sanitize(label));
        let mut matches: Vec<PathBuf> = self
            .list(Some(device))?
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();
        // Timestamps in the filename sort lexicographically.
        matches.sort();
        let latest = matches.pop().ok_or_else(|| {
            FabricError::store(
                self.dir.clone(),
                format!("no snapshot found for device '{device}' label '{label}'"),
            )
        })?;
        Self::load(&latest)
    }

    /// List snapshot files, optionally filtered by device, sorted by name.
    pub fn list(&self, device: Option<&str>) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir).map_err(|err| FabricError::io(self.dir.clone(), err))?;
        let device_prefix = device.map(|d| format!("{}_", sanitize(d)));
        let mut paths: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter(|path| match &device_prefix {
                Some(prefix) => path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(prefix.as_str())),
                None => true,
            })
            .collect();
        paths.sort();
        Ok(paths)
    }

    fn snapshot_path(&self, snapshot: &Snapshot) -> PathBuf {
        let timestamp = snapshot.captured_at.format("%Y%m%dT%H%M%S%3fZ");
        self.dir.join(format!(
            "{}_{}_{timestamp}.json",
            sanitize(&snapshot.device.hostname),
            sanitize(&snapshot.label),
        ))
    }
}

/// Make a device or label fragment safe to embed in a filename.
fn sanitize(fragment: &str) -> String {
    fragment
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | ' ' => '-',
            other => other,
        })
        .collect()
}
