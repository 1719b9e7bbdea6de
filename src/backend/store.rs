use crate::error::SnapshotError;

/// Trait for the persistent key-value namespace snapshots are written to.
///
/// Each call is atomic for its single key. Implementations never merge values:
/// `set` is a total overwrite.
pub trait KeyValueBackend: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError>;

    /// Store (or overwrite) the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), SnapshotError>;

    /// Remove the value under `key`. Returns true if one existed.
    fn remove(&self, key: &str) -> Result<bool, SnapshotError>;
}
