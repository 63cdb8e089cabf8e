//! Snapshot file persistence.
//!
//! RULE: Only store.rs touches the snapshot file.
//! The engine produces and consumes `SnapshotRecord`s; it never does I/O.

use crate::{
    error::QueueResult,
    snapshot::SnapshotRecord,
};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored snapshot.
    ///
    /// A missing or unreadable file means there is nothing to restore and
    /// yields `Ok(None)`. A file that reads fine but does not decode is a
    /// parse error.
    pub fn load(&self) -> QueueResult<Option<SnapshotRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no snapshot at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                log::warn!(
                    "cannot read snapshot {}: {e}; starting without it",
                    self.path.display()
                );
                return Ok(None);
            }
        };
        SnapshotRecord::from_json(&content).map(Some)
    }

    /// Move an undecodable snapshot out of the way so the next save
    /// cannot overwrite it. Returns where it went.
    pub fn set_aside(&self) -> QueueResult<PathBuf> {
        let bad = self.path.with_extension("json.bad");
        fs::rename(&self.path, &bad)?;
        log::warn!(
            "moved unreadable snapshot {} to {}",
            self.path.display(),
            bad.display()
        );
        Ok(bad)
    }

    /// Write the snapshot, replacing any previous one.
    /// Goes through a sibling temp file so a failed write never truncates
    /// the last good snapshot.
    pub fn save(&self, record: &SnapshotRecord) -> QueueResult<()> {
        let json = record.to_json()?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!(
            "snapshot saved to {} (last ticket #{})",
            self.path.display(),
            record.last_ticket_given
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::QueueEngine;

    #[test]
    fn missing_file_is_no_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn directory_in_place_of_file_is_no_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn saved_snapshot_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("queue_data.json"));

        let mut engine = QueueEngine::new();
        engine.take_ticket();
        engine.take_ticket();
        engine.serve_next();

        let record = engine.snapshot();
        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), Some(record));
        assert!(!dir.path().join("queue_data.json.tmp").exists());
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue_data.json");
        fs::write(&path, "{ not json").unwrap();
        let err = SnapshotStore::new(path).load().unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn bad_snapshot_survives_the_next_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue_data.json");
        fs::write(&path, "{ not json").unwrap();
        let store = SnapshotStore::new(path.clone());
        assert!(store.load().unwrap_err().is_parse());

        let bad = store.set_aside().unwrap();
        store.save(&QueueEngine::new().snapshot()).unwrap();

        assert_eq!(bad, dir.path().join("queue_data.json.bad"));
        assert_eq!(fs::read_to_string(&bad).unwrap(), "{ not json");
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("nope").join("queue_data.json"));
        let err = store.save(&QueueEngine::new().snapshot()).unwrap_err();
        assert!(matches!(err, crate::error::QueueError::Storage(_)));
    }
}
