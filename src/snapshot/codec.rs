use serde_json::Value;

use crate::error::SnapshotError;

use super::migration::migrate_record;
use super::record::Snapshot;

/// Serialize one record (the autosave slot format).
pub fn encode_record(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    serde_json::to_string(snapshot)
        .map_err(|e| SnapshotError::StorageFailure(format!("snapshot serialize: {e}")))
}

/// Serialize the collection as a JSON array, preserving order.
pub fn encode_collection(snapshots: &[Snapshot]) -> Result<String, SnapshotError> {
    serde_json::to_string(snapshots)
        .map_err(|e| SnapshotError::StorageFailure(format!("collection serialize: {e}")))
}

pub fn decode_record(raw: &str) -> Result<Snapshot, SnapshotError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| SnapshotError::DeserializationFailure(format!("snapshot parse: {e}")))?;
    record_from_value(value)
}

pub fn decode_collection(raw: &str) -> Result<Vec<Snapshot>, SnapshotError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| SnapshotError::DeserializationFailure(format!("collection parse: {e}")))?;
    let Value::Array(items) = value else {
        return Err(SnapshotError::DeserializationFailure(
            "snapshot collection is not a JSON array".into(),
        ));
    };
    items.into_iter().map(record_from_value).collect()
}

fn record_from_value(value: Value) -> Result<Snapshot, SnapshotError> {
    let migrated = migrate_record(value)?;
    serde_json::from_value(migrated)
        .map_err(|e| SnapshotError::DeserializationFailure(format!("snapshot shape: {e}")))
}
