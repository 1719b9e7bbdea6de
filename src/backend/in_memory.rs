use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::SnapshotError;

use super::store::KeyValueBackend;

/// In-memory key-value backend backed by `Arc<RwLock<HashMap>>`.
///
/// Clone-friendly (cloning shares the same underlying storage), so two stores
/// built over clones of one backend see each other's writes the way two page
/// loads see the same local storage.
#[derive(Clone)]
pub struct InMemoryBackend {
    storage: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            quota: None,
        }
    }

    /// Limit the total stored bytes (keys plus values). Writes that would go over fail
    /// with `StorageFailure`, like a browser's storage quota.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Total bytes currently stored, counting keys and values.
    pub fn used_bytes(&self) -> Result<usize, SnapshotError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| SnapshotError::StorageFailure("backend lock poisoned".into()))?;
        Ok(storage.iter().map(|(k, v)| k.len() + v.len()).sum())
    }

    /// Number of stored keys. A poisoned lock still yields the map it guards.
    pub fn len(&self) -> usize {
        self.storage
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueBackend for InMemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| SnapshotError::StorageFailure("backend lock poisoned during get".into()))?;
        Ok(storage.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SnapshotError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| SnapshotError::StorageFailure("backend lock poisoned during set".into()))?;

        if let Some(quota) = self.quota {
            let others: usize = storage
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(SnapshotError::StorageFailure(format!(
                    "quota exceeded writing {} ({} of {} bytes)",
                    key, needed, quota
                )));
            }
        }

        storage.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, SnapshotError> {
        let mut storage = self.storage.write().map_err(|_| {
            SnapshotError::StorageFailure("backend lock poisoned during remove".into())
        })?;
        Ok(storage.remove(key).is_some())
    }
}
