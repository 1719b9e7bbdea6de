//! Snapshot records and their persisted JSON format.
//!
//! A [`Snapshot`] is one captured state of the edited document: the structured
//! document tree, the style rules, and optionally the raw markup the editor
//! produced at the same instant. The store treats all three as opaque.

mod codec;
mod migration;
mod record;
mod reference;

pub use codec::{decode_collection, decode_record, encode_collection, encode_record};
pub use migration::{migrate_record, RecordMigration, CURRENT_FORMAT_VERSION, MIGRATIONS};
pub use record::{DocumentContent, Snapshot};
pub use reference::SnapshotRef;
