mod backend;
mod clock;
mod debounce;
#[cfg(feature = "emitter")]
mod emitter;
mod error;
mod export;
mod host;
mod snapshot;
mod store;

pub use backend::{FileBackend, InMemoryBackend, KeyValueBackend};
pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::Debouncer;
#[cfg(feature = "emitter")]
pub use emitter::{StoreEvent, StoreNotice, StoreNotifier};
pub use error::SnapshotError;
pub use export::{
    export_html, export_markup, export_project, DownloadSink, ExportArtifact, MarkupCompiler,
    HTML_MIME, JSON_MIME, MARKUP_MIME,
};
pub use host::{EditorHost, HostEvent};
pub use snapshot::{
    decode_collection, decode_record, encode_collection, encode_record, migrate_record,
    DocumentContent, RecordMigration, Snapshot, SnapshotRef, CURRENT_FORMAT_VERSION, MIGRATIONS,
};
pub use store::{SnapshotStore, SnapshotStoreConfig};
