use serde_json::json;
use template_snapshots::{
    DownloadSink, ExportArtifact, MarkupCompiler, SnapshotError, HTML_MIME, JSON_MIME,
};

use crate::support::store;

struct Passthrough;

impl MarkupCompiler for Passthrough {
    fn compile(&self, markup: &str) -> Result<String, String> {
        Ok(format!("<table>{}</table>", markup))
    }
}

#[derive(Default)]
struct CollectingSink {
    delivered: Vec<ExportArtifact>,
}

impl DownloadSink for CollectingSink {
    fn deliver(&mut self, artifact: ExportArtifact) -> Result<(), SnapshotError> {
        self.delivered.push(artifact);
        Ok(())
    }
}

struct FailingSink;

impl DownloadSink for FailingSink {
    fn deliver(&mut self, _artifact: ExportArtifact) -> Result<(), SnapshotError> {
        Err(SnapshotError::StorageFailure("disk full".into()))
    }
}

#[test]
fn html_export_is_named_by_clock() {
    let (mut store, clock, _) = store();
    store.host_mut().markup = Some("<mjml>hello</mjml>".into());
    store.host_mut().style_sheet = Some("p{margin:0}".into());
    clock.advance_millis(1_700_000_000_123);

    let artifact = store.export_html(&Passthrough);
    assert_eq!(artifact.filename, "email-template-1700000000123.html");
    assert_eq!(artifact.mime_type, HTML_MIME);
    let html = String::from_utf8(artifact.bytes).unwrap();
    assert!(html.contains("<table><mjml>hello</mjml></table>"));
    assert!(html.contains("p{margin:0}"));
}

#[test]
fn snapshot_export_and_download() {
    let (mut store, _, _) = store();
    store.host_mut().edit(json!(["a"]));
    store.save_named_snapshot(|| Some("Promo".into())).unwrap();

    let artifact = store.export_snapshot(0).unwrap();
    assert_eq!(artifact.mime_type, JSON_MIME);

    let mut sink = CollectingSink::default();
    store.download(&mut sink, artifact.clone()).unwrap();
    assert_eq!(sink.delivered, vec![artifact]);
}

#[test]
fn export_of_missing_snapshot_is_not_found() {
    let (store, _, _) = store();
    assert!(matches!(
        store.export_snapshot(3),
        Err(SnapshotError::NotFound(_))
    ));
}

#[test]
fn sink_failure_is_surfaced() {
    let (store, _, _) = store();
    let artifact = store.export_markup();
    assert!(store.download(&mut FailingSink, artifact).is_err());
}
