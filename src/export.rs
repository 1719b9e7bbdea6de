//! Downloadable artifacts built from the editor's current state.
//!
//! The store only produces byte buffers and file names; delivering them (a save-as
//! dialog, a browser download, a file write) belongs to a [`DownloadSink`].

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};

use crate::error::SnapshotError;
use crate::host::EditorHost;
use crate::snapshot::Snapshot;

pub const MARKUP_MIME: &str = "application/xml;charset=utf-8";
pub const HTML_MIME: &str = "text/html;charset=utf-8";
pub const JSON_MIME: &str = "application/json";

/// A named byte buffer ready to be handed to a download mechanism.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Inline `data:` URL, for hosts that download or preview through a link.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// External markup-to-HTML compiler.
pub trait MarkupCompiler {
    fn compile(&self, markup: &str) -> Result<String, String>;
}

/// External save-as collaborator.
pub trait DownloadSink {
    fn deliver(&mut self, artifact: ExportArtifact) -> Result<(), SnapshotError>;
}

/// The raw markup as `template.mjml`.
pub fn export_markup<H: EditorHost + ?Sized>(host: &H) -> ExportArtifact {
    ExportArtifact {
        filename: "template.mjml".to_string(),
        mime_type: MARKUP_MIME,
        bytes: host.markup().unwrap_or_default().into_bytes(),
    }
}

/// A standalone HTML document with the host's style sheet inlined.
///
/// When the compiler rejects the markup, the raw markup is embedded instead.
pub fn export_html<H, C>(host: &H, compiler: &C, now: DateTime<Utc>) -> ExportArtifact
where
    H: EditorHost + ?Sized,
    C: MarkupCompiler + ?Sized,
{
    let markup = host.markup().unwrap_or_default();
    let body = match compiler.compile(&markup) {
        Ok(html) => html,
        Err(err) => {
            log::warn!("markup compilation failed, exporting raw markup: {}", err);
            markup
        }
    };
    let style_sheet = host.style_sheet().unwrap_or_default();

    let document = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Email Template</title>
    <style>
        {style_sheet}
    </style>
</head>
<body>
    {body}
</body>
</html>"#
    );

    ExportArtifact {
        filename: format!("email-template-{}.html", now.timestamp_millis()),
        mime_type: HTML_MIME,
        bytes: document.into_bytes(),
    }
}

/// A snapshot record as pretty-printed JSON, for backup or transfer.
pub fn export_project(snapshot: &Snapshot) -> Result<ExportArtifact, SnapshotError> {
    let bytes = serde_json::to_vec_pretty(snapshot)
        .map_err(|e| SnapshotError::StorageFailure(format!("project serialize: {e}")))?;
    Ok(ExportArtifact {
        filename: format!(
            "email-template-{}.json",
            snapshot.captured_at.timestamp_millis()
        ),
        mime_type: JSON_MIME,
        bytes,
    })
}
