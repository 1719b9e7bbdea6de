use event_emitter_rs::EventEmitter;
use serde::{Deserialize, Serialize};

/// Lifecycle events the store announces after the fact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreEvent {
    SnapshotSaved,
    SnapshotRestored,
    AutosaveWritten,
    AutosaveFailed,
    StoreCleared,
}

impl StoreEvent {
    pub fn event_name(self) -> &'static str {
        match self {
            StoreEvent::SnapshotSaved => "snapshot:saved",
            StoreEvent::SnapshotRestored => "snapshot:restored",
            StoreEvent::AutosaveWritten => "autosave:written",
            StoreEvent::AutosaveFailed => "autosave:failed",
            StoreEvent::StoreCleared => "store:cleared",
        }
    }
}

/// Payload delivered to listeners.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreNotice {
    /// Name of the snapshot involved, if any.
    pub name: Option<String>,
    /// Failure description for `AutosaveFailed`.
    pub message: Option<String>,
}

impl StoreNotice {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            name: None,
            message: Some(message.into()),
        }
    }
}

/// Wraps an `EventEmitter` so the UI can show toasts for store activity.
///
/// Listeners run on the emitter's own threads; emitting never waits for them.
///
/// # Example
///
/// ```ignore
/// store.notifier_mut().on(StoreEvent::SnapshotSaved, |notice| {
///     println!("Saved {:?}", notice.name);
/// });
/// ```
pub struct StoreNotifier {
    event_emitter: EventEmitter,
}

impl Default for StoreNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreNotifier {
    pub fn new() -> Self {
        Self {
            event_emitter: EventEmitter::new(),
        }
    }

    /// Register a listener. Returns an id usable with [`StoreNotifier::remove_listener`].
    pub fn on<F>(&mut self, event: StoreEvent, listener: F) -> String
    where
        F: Fn(StoreNotice) + Send + Sync + 'static,
    {
        self.event_emitter.on(event.event_name(), listener)
    }

    pub fn remove_listener(&mut self, listener_id: &str) -> bool {
        self.event_emitter.remove_listener(listener_id).is_some()
    }

    pub fn emit(&mut self, event: StoreEvent, notice: StoreNotice) {
        self.event_emitter.emit(event.event_name(), notice);
    }
}
