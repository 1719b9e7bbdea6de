//! The narrow interface the store consumes from the visual editor.

use serde_json::Value;

use crate::snapshot::DocumentContent;

/// The external editing widget that owns the live document and style tree.
///
/// Reads are synchronous and must reflect a single observation instant; the store
/// calls them back to back without yielding.
pub trait EditorHost {
    /// Current component tree, `None` if the editor has none.
    fn document_state(&self) -> Option<Value>;

    /// Current style rules.
    fn style_state(&self) -> Option<Value>;

    /// Raw markup for the current document.
    fn markup(&self) -> Option<String>;

    /// Compiled style sheet, used when exporting a standalone HTML file.
    fn style_sheet(&self) -> Option<String> {
        None
    }

    /// Whether the editor currently holds no document.
    fn is_empty(&self) -> bool {
        self.document_state().is_none() && self.markup().map_or(true, |m| m.trim().is_empty())
    }

    /// Replace the current content wholesale. `style` of `None` leaves the styles as they are.
    fn replace_state(&mut self, content: DocumentContent, style: Option<Value>);
}

/// Notifications the editor host forwards to the store. Both may fire any number
/// of times, in any order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    ContentChanged,
    InitialLoadComplete,
}
