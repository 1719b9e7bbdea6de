use serde_json::json;
use template_snapshots::{
    DocumentContent, HostEvent, InMemoryBackend, KeyValueBackend, ManualClock, SnapshotStore,
    SnapshotStoreConfig,
};

use crate::support::{store, store_with, RecordingHost};

/// Write an autosave through one store, as a previous page load would have.
fn previous_session(backend: &InMemoryBackend, document: serde_json::Value) {
    let (mut earlier, _) = store_with(RecordingHost::with_document(document), backend.clone());
    assert!(earlier.capture_autosave());
}

#[test]
fn restores_last_autosave_once() {
    let backend = InMemoryBackend::new();
    previous_session(&backend, json!("<saved work>"));

    let (mut store, _) = store_with(RecordingHost::default(), backend);
    assert!(store.restore_on_load());
    assert!(!store.restore_on_load());
    store.handle_event(HostEvent::InitialLoadComplete);

    assert_eq!(store.host().replacements.len(), 1);
    assert_eq!(store.host().document, Some(json!("<saved work>")));
    assert!(store.has_restored());
}

#[test]
fn duplicate_load_event_does_not_stomp_edits() {
    let backend = InMemoryBackend::new();
    previous_session(&backend, json!("<stale>"));

    let (mut store, _) = store_with(RecordingHost::default(), backend);
    store.handle_event(HostEvent::InitialLoadComplete);
    store.host_mut().edit(json!("<fresh edit>"));
    store.handle_event(HostEvent::InitialLoadComplete);

    assert_eq!(store.host().document, Some(json!("<fresh edit>")));
}

#[test]
fn latch_resets_with_a_new_store() {
    let backend = InMemoryBackend::new();
    previous_session(&backend, json!("<saved>"));

    let (mut first, _) = store_with(RecordingHost::default(), backend.clone());
    assert!(first.restore_on_load());

    let (mut second, _) = store_with(RecordingHost::default(), backend);
    assert!(second.restore_on_load());
}

#[test]
fn nothing_to_restore_on_fresh_backend() {
    let (mut store, _, _) = store();
    assert!(!store.restore_on_load());
    assert!(store.host().replacements.is_empty());
    // the latch is spent even when nothing was restored
    assert!(store.has_restored());
}

#[test]
fn clear_all_then_load_is_a_no_op() {
    let backend = InMemoryBackend::new();
    previous_session(&backend, json!("<saved>"));

    let (mut earlier, _) = store_with(RecordingHost::default(), backend.clone());
    earlier.save_named_snapshot(|| Some("kept".into())).unwrap();
    earlier.clear_all().unwrap();
    assert!(earlier.list_snapshots().unwrap().is_empty());

    let (mut store, _) = store_with(RecordingHost::default(), backend);
    assert!(!store.restore_on_load());
    assert!(store.host().replacements.is_empty());
}

#[test]
fn structured_state_preferred_over_markup() {
    let backend = InMemoryBackend::new();
    let host = RecordingHost {
        document: Some(json!([{"type": "mj-section"}])),
        markup: Some("<mjml>raw</mjml>".into()),
        ..Default::default()
    };
    let (mut earlier, _) = store_with(host, backend.clone());
    earlier.capture_autosave();

    let (mut store, _) = store_with(RecordingHost::default(), backend);
    store.restore_on_load();
    assert_eq!(
        store.host().replacements[0].0,
        DocumentContent::Structured(json!([{"type": "mj-section"}]))
    );
}

#[test]
fn corrupt_slot_is_logged_and_skipped() {
    let (mut store, _, backend) = store();
    backend.set("mjml-last-template", "not json").unwrap();
    assert!(!store.restore_on_load());
    assert!(store.host().replacements.is_empty());
}

#[test]
fn empty_slot_record_is_skipped() {
    let backend = InMemoryBackend::new();
    let (mut earlier, _) = store_with(RecordingHost::default(), backend.clone());
    earlier.capture_autosave();
    assert!(earlier.last_autosave().unwrap().is_some());

    let (mut store, _) = store_with(RecordingHost::default(), backend);
    assert!(!store.restore_on_load());
}

fn store_with_default_template(
    host: RecordingHost,
    backend: InMemoryBackend,
) -> SnapshotStore<RecordingHost, InMemoryBackend, ManualClock> {
    SnapshotStore::with_clock(host, backend, ManualClock::at_epoch()).with_config(
        SnapshotStoreConfig::default()
            .with_default_template(DocumentContent::Markup("<mjml>welcome</mjml>".into())),
    )
}

#[test]
fn default_template_injected_into_empty_editor() {
    let mut store = store_with_default_template(RecordingHost::default(), InMemoryBackend::new());
    assert!(store.restore_on_load());
    assert_eq!(store.host().markup.as_deref(), Some("<mjml>welcome</mjml>"));
    assert!(!store.restore_on_load());
    assert_eq!(store.host().replacements.len(), 1);
}

#[test]
fn default_template_never_overwrites_existing_content() {
    let mut store = store_with_default_template(
        RecordingHost::with_document(json!(["user content"])),
        InMemoryBackend::new(),
    );
    assert!(!store.restore_on_load());
    assert_eq!(store.host().document, Some(json!(["user content"])));
}

#[test]
fn autosave_wins_over_default_template() {
    let backend = InMemoryBackend::new();
    previous_session(&backend, json!("<saved>"));

    let mut store = store_with_default_template(RecordingHost::default(), backend);
    assert!(store.restore_on_load());
    assert_eq!(store.host().document, Some(json!("<saved>")));
}

#[test]
fn events_in_any_order() {
    let backend = InMemoryBackend::new();
    previous_session(&backend, json!("<saved>"));

    let (mut store, clock) = store_with(RecordingHost::default(), backend);
    store.handle_event(HostEvent::ContentChanged);
    store.handle_event(HostEvent::InitialLoadComplete);
    store.handle_event(HostEvent::ContentChanged);
    clock.advance_millis(2000);
    assert!(store.poll());

    assert_eq!(store.host().replacements.len(), 1);
    let slot = store.last_autosave().unwrap().unwrap();
    assert_eq!(slot.document_state, Some(json!("<saved>")));
}

#[test]
fn autosave_survives_restart_on_file_backend() {
    use template_snapshots::FileBackend;

    let temp_dir = tempfile::TempDir::new().unwrap();
    {
        let backend = FileBackend::open(temp_dir.path()).unwrap();
        let mut store = SnapshotStore::with_clock(
            RecordingHost::with_document(json!("<on disk>")),
            backend,
            ManualClock::at_epoch(),
        );
        assert!(store.capture_autosave());
    }

    let backend = FileBackend::open(temp_dir.path()).unwrap();
    let mut store = SnapshotStore::with_clock(
        RecordingHost::default(),
        backend,
        ManualClock::at_epoch(),
    );
    assert!(store.restore_on_load());
    assert_eq!(store.host().document, Some(json!("<on disk>")));
}
