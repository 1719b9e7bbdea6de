use std::sync::mpsc::channel;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::json;
use template_snapshots::{InMemoryBackend, StoreEvent, StoreNotice};

use crate::support::{store, store_with, RecordingHost};

#[test]
fn save_announces_snapshot_name() {
    let (mut store, _, _) = store();
    let (tx, rx) = channel();
    let tx = Mutex::new(tx);
    store
        .notifier_mut()
        .on(StoreEvent::SnapshotSaved, move |notice: StoreNotice| {
            let _ = tx.lock().unwrap().send(notice);
        });

    store.host_mut().edit(json!("doc"));
    store.save_named_snapshot(|| Some("Launch".into())).unwrap();

    // EventEmitter is async, wait for delivery
    let notice = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(notice.name.as_deref(), Some("Launch"));
}

#[test]
fn failed_autosave_is_announced() {
    let (mut store, _) = store_with(
        RecordingHost::with_document(json!("too big")),
        InMemoryBackend::new().with_quota(1),
    );
    let (tx, rx) = channel();
    let tx = Mutex::new(tx);
    store
        .notifier_mut()
        .on(StoreEvent::AutosaveFailed, move |notice: StoreNotice| {
            let _ = tx.lock().unwrap().send(notice);
        });

    assert!(!store.capture_autosave());

    let notice = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert!(notice.message.unwrap().contains("quota"));
}
