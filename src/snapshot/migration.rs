use serde_json::{Map, Value};

use crate::error::SnapshotError;

/// Format version written by this crate.
pub const CURRENT_FORMAT_VERSION: u32 = 2;

/// Version assumed for records without a `formatVersion` field.
const LEGACY_FORMAT_VERSION: u32 = 1;

/// A pure transformation of a stored record from one format version to the next.
///
/// Plain structs with function pointers, returned as a static slice.
pub struct RecordMigration {
    pub from_version: u32,
    pub to_version: u32,
    pub transform: fn(Map<String, Value>) -> Map<String, Value>,
}

pub static MIGRATIONS: &[RecordMigration] = &[RecordMigration {
    from_version: 1,
    to_version: 2,
    transform: legacy_to_v2,
}];

/// Bring a raw stored record up to `CURRENT_FORMAT_VERSION`. Chains automatically (v1->v2->v3).
pub fn migrate_record(value: Value) -> Result<Value, SnapshotError> {
    migrate_with(value, MIGRATIONS)
}

fn migrate_with(value: Value, migrations: &[RecordMigration]) -> Result<Value, SnapshotError> {
    let Value::Object(mut record) = value else {
        return Err(SnapshotError::DeserializationFailure(
            "snapshot record is not a JSON object".into(),
        ));
    };

    let mut version = match record.get("formatVersion") {
        None | Some(Value::Null) => LEGACY_FORMAT_VERSION,
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| {
                SnapshotError::DeserializationFailure(format!("invalid formatVersion {}", v))
            })?,
    };

    loop {
        let mut applied = false;
        for m in migrations {
            if m.from_version == version {
                record = (m.transform)(record);
                version = m.to_version;
                applied = true;
                break; // restart to handle chaining
            }
        }
        if !applied {
            break;
        }
    }

    if version != CURRENT_FORMAT_VERSION {
        return Err(SnapshotError::DeserializationFailure(format!(
            "unsupported snapshot formatVersion {} (expected {})",
            version, CURRENT_FORMAT_VERSION
        )));
    }

    record.insert("formatVersion".into(), Value::from(version));
    Ok(Value::Object(record))
}

/// The browser-era layout: `{ html, css, components, styles, timestamp, name }`.
fn legacy_to_v2(mut record: Map<String, Value>) -> Map<String, Value> {
    let mut renamed = Map::new();
    for (from, to) in [
        ("components", "documentState"),
        ("styles", "styleState"),
        ("html", "markup"),
        ("timestamp", "capturedAt"),
    ] {
        if let Some(value) = record.remove(from) {
            renamed.insert(to.to_string(), value);
        }
    }
    // Compiled CSS is derived from the style state; nothing to carry over.
    record.remove("css");

    if !matches!(record.get("name"), Some(Value::String(_))) {
        record.insert("name".into(), Value::from("Untitled"));
    }
    record.extend(renamed);
    record.insert("formatVersion".into(), Value::from(2u32));
    record
}
