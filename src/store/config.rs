use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::snapshot::DocumentContent;

/// Longest accepted debounce; larger values are clamped.
const MAX_DEBOUNCE_MS: u64 = 24 * 60 * 60 * 1000;

/// Store configuration. Deserializes from camelCase JSON with every field optional:
///
/// ```json
/// { "debounceMs": 1500, "autosaveKey": "my-editor-last" }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapshotStoreConfig {
    /// Quiet period after the last content change before an autosave is written.
    pub debounce_ms: u64,
    /// Backend key holding the named snapshot collection.
    pub collection_key: String,
    /// Backend key holding the last-autosave slot.
    pub autosave_key: String,
    /// Name given to autosave records.
    pub autosave_name: String,
    /// Document injected on first load when nothing was autosaved and the editor is empty.
    pub default_template: Option<DocumentContent>,
}

impl Default for SnapshotStoreConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 2000,
            collection_key: "mjml-email-templates".to_string(),
            autosave_key: "mjml-last-template".to_string(),
            autosave_name: "Auto-saved".to_string(),
            default_template: None,
        }
    }
}

impl SnapshotStoreConfig {
    pub fn with_debounce(mut self, debounce: std::time::Duration) -> Self {
        self.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(MAX_DEBOUNCE_MS);
        self
    }

    pub fn with_keys(
        mut self,
        collection_key: impl Into<String>,
        autosave_key: impl Into<String>,
    ) -> Self {
        self.collection_key = collection_key.into();
        self.autosave_key = autosave_key.into();
        self
    }

    pub fn with_autosave_name(mut self, name: impl Into<String>) -> Self {
        self.autosave_name = name.into();
        self
    }

    pub fn with_default_template(mut self, template: DocumentContent) -> Self {
        self.default_template = Some(template);
        self
    }

    pub(crate) fn debounce(&self) -> Duration {
        // clamped, so the cast cannot overflow
        Duration::milliseconds(self.debounce_ms.min(MAX_DEBOUNCE_MS) as i64)
    }
}
