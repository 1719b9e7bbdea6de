use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::migration::CURRENT_FORMAT_VERSION;

/// The document half of a snapshot, in whichever representation is available.
///
/// `Structured` is the editor's own component tree and is always preferred;
/// `Markup` is the raw markup string, used only when no tree was captured.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum DocumentContent {
    Structured(Value),
    Markup(String),
}

/// One persisted capture of document and style state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub format_version: u32,
    /// Present on named snapshots only; the autosave slot needs no identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub captured_at: DateTime<Utc>,
    #[serde(default)]
    pub document_state: Option<Value>,
    #[serde(default)]
    pub style_state: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
}

impl Snapshot {
    pub fn new(name: impl Into<String>, captured_at: DateTime<Utc>) -> Self {
        Self {
            format_version: CURRENT_FORMAT_VERSION,
            id: None,
            name: name.into(),
            captured_at,
            document_state: None,
            style_state: None,
            markup: None,
        }
    }

    /// Assign a fresh random id, marking this as a named (collection) snapshot.
    pub fn with_new_id(mut self) -> Self {
        self.id = Some(Uuid::new_v4());
        self
    }

    pub fn with_document_state(mut self, state: Option<Value>) -> Self {
        self.document_state = state.filter(|v| !v.is_null());
        self
    }

    pub fn with_style_state(mut self, state: Option<Value>) -> Self {
        self.style_state = state.filter(|v| !v.is_null());
        self
    }

    pub fn with_markup(mut self, markup: Option<String>) -> Self {
        self.markup = markup;
        self
    }

    /// The document to restore: the structured tree if captured, else non-empty markup.
    pub fn content(&self) -> Option<DocumentContent> {
        if let Some(state) = &self.document_state {
            return Some(DocumentContent::Structured(state.clone()));
        }
        self.markup
            .as_ref()
            .filter(|m| !m.trim().is_empty())
            .map(|m| DocumentContent::Markup(m.clone()))
    }

    /// True when there is nothing to restore from this record.
    pub fn is_empty(&self) -> bool {
        self.content().is_none()
    }
}
