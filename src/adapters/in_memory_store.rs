//! In-memory value store for testing.
//!
//! Tables are kept as serialized JSON bytes so the in-memory path exercises
//! the same encoding contract as the file store.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, learning::ValueTable, ports::ValueStore};

/// In-memory value store.
///
/// Clones share the same underlying storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    /// Number of stored tables
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&Self::key(path))
    }

    /// Store raw bytes at `path`, bypassing serialization.
    pub fn insert_raw(&self, path: &Path, bytes: impl Into<Vec<u8>>) {
        self.storage().insert(Self::key(path), bytes.into());
    }
}

impl ValueStore for InMemoryStore {
    fn load(&self, path: &Path) -> Result<ValueTable> {
        match self.storage().get(&Self::key(path)) {
            Some(bytes) => Ok(serde_json::from_slice(bytes)?),
            None => Ok(ValueTable::new()),
        }
    }

    fn save(&self, table: &ValueTable, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(table)?;
        self.storage().insert(Self::key(path), bytes);
        Ok(())
    }
}
