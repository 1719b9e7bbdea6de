use chrono::{DateTime, Utc};

use crate::backend::KeyValueBackend;
use crate::clock::{Clock, SystemClock};
use crate::debounce::Debouncer;
#[cfg(feature = "emitter")]
use crate::emitter::{StoreEvent, StoreNotice, StoreNotifier};
use crate::error::SnapshotError;
use crate::export::{self, DownloadSink, ExportArtifact, MarkupCompiler};
use crate::host::{EditorHost, HostEvent};
use crate::snapshot::{
    decode_collection, decode_record, encode_collection, encode_record, Snapshot, SnapshotRef,
};

use super::config::SnapshotStoreConfig;
use super::latch::RestoreLatch;

/// Mediates between an editor host and a key-value backend.
///
/// Single-threaded and cooperative: the owner forwards host notifications through
/// [`SnapshotStore::handle_event`] and calls [`SnapshotStore::poll`] from its event
/// loop so the debounced autosave can fire. Nothing here blocks or spawns.
pub struct SnapshotStore<H, B, C = SystemClock> {
    host: H,
    backend: B,
    clock: C,
    config: SnapshotStoreConfig,
    debouncer: Debouncer,
    restore_latch: RestoreLatch,
    last_captured_at: Option<DateTime<Utc>>,
    #[cfg(feature = "emitter")]
    notifier: StoreNotifier,
}

impl<H, B> SnapshotStore<H, B, SystemClock>
where
    H: EditorHost,
    B: KeyValueBackend,
{
    pub fn new(host: H, backend: B) -> Self {
        Self::with_clock(host, backend, SystemClock)
    }
}

impl<H, B, C> SnapshotStore<H, B, C>
where
    H: EditorHost,
    B: KeyValueBackend,
    C: Clock,
{
    pub fn with_clock(host: H, backend: B, clock: C) -> Self {
        let config = SnapshotStoreConfig::default();
        Self {
            host,
            backend,
            clock,
            debouncer: Debouncer::new(config.debounce()),
            config,
            restore_latch: RestoreLatch::default(),
            last_captured_at: None,
            #[cfg(feature = "emitter")]
            notifier: StoreNotifier::new(),
        }
    }

    /// Replace the configuration. Any pending autosave is kept, with its original deadline.
    pub fn with_config(mut self, config: SnapshotStoreConfig) -> Self {
        let pending = self.debouncer.deadline();
        self.debouncer = Debouncer::new(config.debounce());
        if let Some(deadline) = pending {
            self.debouncer.schedule(deadline - self.debouncer.delay());
        }
        self.config = config;
        self
    }

    pub fn config(&self) -> &SnapshotStoreConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(feature = "emitter")]
    pub fn notifier_mut(&mut self) -> &mut StoreNotifier {
        &mut self.notifier
    }

    pub fn has_pending_autosave(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Whether the one-shot load restoration has already run.
    pub fn has_restored(&self) -> bool {
        self.restore_latch.is_fired()
    }

    /// Dispatch a host notification. Duplicates and any ordering are tolerated.
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::ContentChanged => self.on_content_changed(),
            HostEvent::InitialLoadComplete => {
                self.restore_on_load();
            }
        }
    }

    /// (Re)start the debounce window. The autosave fires from [`SnapshotStore::poll`]
    /// once no further change arrives for the configured delay.
    pub fn on_content_changed(&mut self) {
        let deadline = self.debouncer.schedule(self.clock.now());
        log::debug!("autosave scheduled for {}", deadline);
    }

    /// Run the pending autosave if its deadline has passed. Returns whether it ran.
    pub fn poll(&mut self) -> bool {
        if self.debouncer.fire_if_due(self.clock.now()) {
            self.capture_autosave();
            true
        } else {
            false
        }
    }

    /// Capture the host state into the last-autosave slot.
    ///
    /// Failures are logged and swallowed; the next debounce cycle supersedes them.
    /// Returns whether the write succeeded.
    pub fn capture_autosave(&mut self) -> bool {
        let snapshot = self.capture(self.config.autosave_name.clone());
        match self.write_slot(&snapshot) {
            Ok(()) => {
                log::debug!("autosave written to {}", self.config.autosave_key);
                #[cfg(feature = "emitter")]
                self.notifier
                    .emit(StoreEvent::AutosaveWritten, StoreNotice::named(&snapshot.name));
                true
            }
            Err(err) => {
                log::warn!("autosave failed: {}", err);
                #[cfg(feature = "emitter")]
                self.notifier
                    .emit(StoreEvent::AutosaveFailed, StoreNotice::failed(err.to_string()));
                false
            }
        }
    }

    /// Capture the host state as a named snapshot, append it to the collection and
    /// overwrite the autosave slot with it.
    ///
    /// `resolve_name` is asked for a label after the state is captured; `None`, empty
    /// or whitespace-only answers fall back to `"Template <epoch millis>"`.
    pub fn save_named_snapshot<F>(&mut self, resolve_name: F) -> Result<Snapshot, SnapshotError>
    where
        F: FnOnce() -> Option<String>,
    {
        let mut snapshot = self.capture(String::new()).with_new_id();
        snapshot.name = resolve_name()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Template {}", snapshot.captured_at.timestamp_millis()));

        // Refuse to overwrite a collection we cannot read.
        let previous = self.backend.get(&self.config.collection_key)?;
        let mut snapshots = match &previous {
            Some(raw) => decode_collection(raw)?,
            None => Vec::new(),
        };
        snapshots.push(snapshot.clone());
        let encoded = encode_collection(&snapshots)?;
        self.backend.set(&self.config.collection_key, &encoded)?;
        if let Err(err) = self.write_slot(&snapshot) {
            self.roll_back_collection(previous);
            return Err(err);
        }

        log::info!("saved snapshot {:?} ({} total)", snapshot.name, snapshots.len());
        #[cfg(feature = "emitter")]
        self.notifier
            .emit(StoreEvent::SnapshotSaved, StoreNotice::named(&snapshot.name));
        Ok(snapshot)
    }

    /// The named snapshots in insertion order. Empty when nothing was ever saved.
    pub fn list_snapshots(&self) -> Result<Vec<Snapshot>, SnapshotError> {
        match self.backend.get(&self.config.collection_key)? {
            Some(raw) => decode_collection(&raw),
            None => Ok(Vec::new()),
        }
    }

    /// Look up a named snapshot without touching the host.
    pub fn get_snapshot(
        &self,
        reference: impl Into<SnapshotRef>,
    ) -> Result<Snapshot, SnapshotError> {
        let reference = reference.into();
        let snapshots = self.list_snapshots()?;
        let found = match reference {
            SnapshotRef::Index(index) => snapshots.into_iter().nth(index),
            SnapshotRef::Id(id) => snapshots.into_iter().find(|s| s.id == Some(id)),
        };
        found.ok_or(SnapshotError::NotFound(reference))
    }

    /// Replace the host's content with a named snapshot.
    pub fn restore_snapshot(
        &mut self,
        reference: impl Into<SnapshotRef>,
    ) -> Result<Snapshot, SnapshotError> {
        let snapshot = self.get_snapshot(reference)?;
        let content = snapshot.content().ok_or_else(|| {
            SnapshotError::DeserializationFailure(format!(
                "snapshot {:?} has neither document state nor markup",
                snapshot.name
            ))
        })?;
        self.host.replace_state(content, snapshot.style_state.clone());

        log::info!("restored snapshot {:?}", snapshot.name);
        #[cfg(feature = "emitter")]
        self.notifier
            .emit(StoreEvent::SnapshotRestored, StoreNotice::named(&snapshot.name));
        Ok(snapshot)
    }

    /// The current autosave record, if any.
    pub fn last_autosave(&self) -> Result<Option<Snapshot>, SnapshotError> {
        self.backend
            .get(&self.config.autosave_key)?
            .map(|raw| decode_record(&raw))
            .transpose()
    }

    /// Restore the last autosave into the host, at most once per store.
    ///
    /// The host's load notification can fire more than once during start-up; only the
    /// first call does anything, so later ones cannot overwrite edits made in between.
    /// With no usable autosave, the configured default template is injected into an
    /// empty host instead. Failures are logged, never returned. Returns whether the
    /// host content was replaced.
    pub fn restore_on_load(&mut self) -> bool {
        if !self.restore_latch.try_fire() {
            log::debug!("restore on load already ran, ignoring");
            return false;
        }

        let autosave = match self.last_autosave() {
            Ok(autosave) => autosave,
            Err(err) => {
                log::warn!("could not read last autosave: {}", err);
                None
            }
        };

        if let Some(snapshot) = autosave {
            if let Some(content) = snapshot.content() {
                log::info!("restoring last autosave from {}", snapshot.captured_at);
                self.host.replace_state(content, snapshot.style_state);
                return true;
            }
        }

        match &self.config.default_template {
            Some(template) if self.host.is_empty() => {
                log::info!("editor is empty, loading default template");
                self.host.replace_state(template.clone(), None);
                true
            }
            _ => false,
        }
    }

    /// Remove every named snapshot and the autosave slot. Irreversible.
    ///
    /// Also drops a pending autosave so it cannot repopulate the slot afterwards.
    pub fn clear_all(&mut self) -> Result<(), SnapshotError> {
        self.debouncer.cancel();
        self.backend.remove(&self.config.collection_key)?;
        self.backend.remove(&self.config.autosave_key)?;

        log::info!("cleared all snapshots");
        #[cfg(feature = "emitter")]
        self.notifier
            .emit(StoreEvent::StoreCleared, StoreNotice::default());
        Ok(())
    }

    /// The host's raw markup as a download.
    pub fn export_markup(&self) -> ExportArtifact {
        export::export_markup(&self.host)
    }

    /// The host's content compiled into a standalone HTML document.
    pub fn export_html<M: MarkupCompiler + ?Sized>(&self, compiler: &M) -> ExportArtifact {
        export::export_html(&self.host, compiler, self.clock.now())
    }

    /// A named snapshot as a JSON project file.
    pub fn export_snapshot(
        &self,
        reference: impl Into<SnapshotRef>,
    ) -> Result<ExportArtifact, SnapshotError> {
        export::export_project(&self.get_snapshot(reference)?)
    }

    /// Hand an artifact to the download collaborator.
    pub fn download<S: DownloadSink + ?Sized>(
        &self,
        sink: &mut S,
        artifact: ExportArtifact,
    ) -> Result<(), SnapshotError> {
        log::debug!("delivering {} ({} bytes)", artifact.filename, artifact.bytes.len());
        sink.deliver(artifact)
    }

    /// Read document and style state in one go, stamped with a non-decreasing time.
    fn capture(&mut self, name: String) -> Snapshot {
        let document_state = self.host.document_state();
        let style_state = self.host.style_state();
        let markup = self.host.markup();

        let now = self.clock.now();
        let captured_at = match self.last_captured_at {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_captured_at = Some(captured_at);

        Snapshot::new(name, captured_at)
            .with_document_state(document_state)
            .with_style_state(style_state)
            .with_markup(markup)
    }

    /// Put the collection back the way it was before a save that could not finish.
    fn roll_back_collection(&self, previous: Option<String>) {
        let key = &self.config.collection_key;
        let rolled_back = match previous {
            Some(raw) => self.backend.set(key, &raw),
            None => self.backend.remove(key).map(|_| ()),
        };
        if let Err(err) = rolled_back {
            log::error!("could not roll back {} after a failed save: {}", key, err);
        }
    }

    fn write_slot(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let encoded = encode_record(snapshot)?;
        self.backend.set(&self.config.autosave_key, &encoded)
    }
}
