use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use super::snapshot::Snapshot;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where the player keeps its snapshot.
pub trait SnapshotStore {
    /// The last saved snapshot, or `None` when absent or unreadable.
    fn load(&self) -> Option<Snapshot>;
    /// Replace the stored snapshot (last write wins).
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&self) -> Option<Snapshot> {
        (**self).load()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
        (**self).save(snapshot)
    }
}

/// JSON file on disk. Writes land in a sibling temp file first and are then
/// renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Option<Snapshot> {
        match fs::read(&self.path) {
            Ok(bytes) => Snapshot::decode(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("cannot read snapshot {}: {e}", self.path.display());
                None
            }
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = snapshot.encode()?;
        let tmp = self.temp_path();
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Keeps the snapshot in memory; used when persistence is disabled.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<Snapshot>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            writes: 0,
        }
    }

    /// Number of saves so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<Snapshot> {
        self.snapshot.clone()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
        self.snapshot = Some(snapshot.clone());
        self.writes += 1;
        Ok(())
    }
}
