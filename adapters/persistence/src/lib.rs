#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Save-store adapters backing the engine's persistence port.
//!
//! [`JsonSaveStore`] persists the session as pretty-printed JSON at a
//! caller-chosen path; [`MemorySaveStore`] keeps the record in memory and
//! exists for tests and ephemeral sessions.

use std::fs;
use std::io;
use std::path::PathBuf;

use polygon_defence_core::{SaveRecord, SaveStore, SaveStoreError};

/// Save store writing a single JSON document to disk.
#[derive(Debug)]
pub struct JsonSaveStore {
    path: PathBuf,
}

impl JsonSaveStore {
    /// Creates a store persisting at `path`. The file is created on the
    /// first save; parent directories must already exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the store reads and writes.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SaveStore for JsonSaveStore {
    fn save(&mut self, record: &SaveRecord) -> Result<(), SaveStoreError> {
        let body = serde_json::to_string_pretty(record)
            .map_err(|err| SaveStoreError::Backend(err.to_string()))?;
        fs::write(&self.path, body).map_err(|err| SaveStoreError::Backend(err.to_string()))
    }

    fn load(&mut self) -> Result<SaveRecord, SaveStoreError> {
        let body = fs::read_to_string(&self.path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                SaveStoreError::Missing
            } else {
                SaveStoreError::Backend(err.to_string())
            }
        })?;
        serde_json::from_str(&body).map_err(|err| SaveStoreError::Corrupt(err.to_string()))
    }

    fn delete(&mut self) {
        // A missing file is already the desired state.
        let _ = fs::remove_file(&self.path);
    }
}

/// Save store holding at most one record in memory.
#[derive(Debug, Default)]
pub struct MemorySaveStore {
    record: Option<SaveRecord>,
}

impl MemorySaveStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a record is currently held.
    #[must_use]
    pub fn has_record(&self) -> bool {
        self.record.is_some()
    }
}

impl SaveStore for MemorySaveStore {
    fn save(&mut self, record: &SaveRecord) -> Result<(), SaveStoreError> {
        self.record = Some(record.clone());
        Ok(())
    }

    fn load(&mut self) -> Result<SaveRecord, SaveStoreError> {
        self.record.clone().ok_or(SaveStoreError::Missing)
    }

    fn delete(&mut self) {
        self.record = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonSaveStore, MemorySaveStore};
    use polygon_defence_core::{
        catalog::{Difficulty, MapId, TowerKind},
        SaveRecord, SaveStore, SaveStoreError, TargetPriority, TowerRecord,
    };

    fn record() -> SaveRecord {
        SaveRecord {
            map: MapId::Volcano,
            difficulty: Difficulty::Easy,
            money: 875,
            lives: 142,
            current_round: 4,
            towers: vec![TowerRecord {
                kind: TowerKind::Frost,
                x: 500.0,
                y: 350.0,
                upgrades: [0, 1, 2],
                pop_count: 63,
                targeting: TargetPriority::Last,
            }],
        }
    }

    #[test]
    fn json_store_round_trips_a_session() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut store = JsonSaveStore::new(dir.path().join("save.json"));
        store.save(&record()).expect("save");
        let restored = store.load().expect("load");
        assert_eq!(restored, record());
    }

    #[test]
    fn json_store_reports_a_missing_file_as_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut store = JsonSaveStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.load(), Err(SaveStoreError::Missing)));
    }

    #[test]
    fn json_store_reports_unparseable_data_as_corrupt() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("save.json");
        std::fs::write(&path, "{ not json").expect("write");
        let mut store = JsonSaveStore::new(path);
        assert!(matches!(store.load(), Err(SaveStoreError::Corrupt(_))));
    }

    #[test]
    fn json_store_delete_removes_the_file_and_tolerates_absence() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("save.json");
        let mut store = JsonSaveStore::new(path.clone());
        store.save(&record()).expect("save");
        assert!(path.exists());
        store.delete();
        assert!(!path.exists());
        store.delete();
    }

    #[test]
    fn memory_store_round_trips_and_deletes() {
        let mut store = MemorySaveStore::new();
        assert!(matches!(store.load(), Err(SaveStoreError::Missing)));
        store.save(&record()).expect("save");
        assert!(store.has_record());
        assert_eq!(store.load().expect("load"), record());
        store.delete();
        assert!(!store.has_record());
    }
}
