use std::fmt;

use uuid::Uuid;

/// How a caller points at an entry of the snapshot collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapshotRef {
    /// Zero-based position in insertion order.
    Index(usize),
    Id(Uuid),
}

impl From<usize> for SnapshotRef {
    fn from(index: usize) -> Self {
        SnapshotRef::Index(index)
    }
}

impl From<Uuid> for SnapshotRef {
    fn from(id: Uuid) -> Self {
        SnapshotRef::Id(id)
    }
}

impl fmt::Display for SnapshotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotRef::Index(index) => write!(f, "index {}", index),
            SnapshotRef::Id(id) => write!(f, "id {}", id),
        }
    }
}
