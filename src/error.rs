use std::fmt;

use crate::snapshot::SnapshotRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The backend rejected a read or write (quota exceeded, storage disabled, I/O).
    StorageFailure(String),
    /// Stored data could not be parsed back into a snapshot record.
    DeserializationFailure(String),
    /// No snapshot at the requested index or id.
    NotFound(SnapshotRef),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::StorageFailure(msg) => write!(f, "snapshot storage failure: {}", msg),
            SnapshotError::DeserializationFailure(msg) => {
                write!(f, "snapshot deserialization failure: {}", msg)
            }
            SnapshotError::NotFound(reference) => write!(f, "snapshot not found: {}", reference),
        }
    }
}

impl std::error::Error for SnapshotError {}
