//! The snapshot store: debounced autosave, named snapshots, restore-once on load.
//!
//! ## Example
//!
//! ```ignore
//! use template_snapshots::{InMemoryBackend, HostEvent, SnapshotStore};
//!
//! let mut store = SnapshotStore::new(editor, InMemoryBackend::new());
//!
//! // wire the editor's notifications
//! store.handle_event(HostEvent::InitialLoadComplete);
//! store.handle_event(HostEvent::ContentChanged);
//!
//! // from the event loop
//! store.poll();
//!
//! // toolbar actions
//! let saved = store.save_named_snapshot(|| prompt("Template name"))?;
//! store.restore_snapshot(0)?;
//! ```

mod config;
mod latch;
mod snapshot_store;

pub use config::SnapshotStoreConfig;
pub use snapshot_store::SnapshotStore;
