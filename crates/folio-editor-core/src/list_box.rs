//! Ordered/unordered list surface.
//!
//! Items serialize into list markup on display and split back out of the
//! surface text on blur, one item per line. New items come from Enter via
//! the surface's native line breaks, so Enter is not filtered here.

use folio_renderer::render_list;

use crate::text_box::{Key, KeyAction};

/// Editable/read-only list surface over an item array.
#[derive(Debug, Clone)]
pub struct ListBox {
    items: Vec<String>,
    ordered: bool,
    editable: bool,
    focused: bool,
    /// Live surface text while editing, one line per item.
    text: String,
}

impl ListBox {
    pub fn new(items: Vec<String>, ordered: bool, editable: bool) -> Self {
        Self {
            items,
            ordered,
            editable,
            focused: false,
            text: String::new(),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// List markup for the surface: raw item text when editable, inline
    /// rendered when read-only.
    pub fn markup(&self) -> String {
        render_list(&self.items, self.editable)
    }

    /// External item update (e.g. document reload); ignored mid-edit.
    pub fn set_items(&mut self, items: Vec<String>) {
        if !self.focused {
            self.items = items;
        }
    }

    pub fn focus(&mut self) {
        if !self.editable {
            return;
        }
        self.focused = true;
        self.text = self.items.join("\n");
    }

    /// Text input from the host while editing.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.focused {
            self.text = text.into();
        }
    }

    /// Focus lost: split the surface text back into items and emit them.
    /// An emptied surface still yields one (empty) item, so the list never
    /// collapses to nothing.
    pub fn blur(&mut self) -> Vec<String> {
        if self.focused {
            self.items = self.text.split('\n').map(str::to_string).collect();
            self.focused = false;
        }
        self.items.clone()
    }

    /// Filter a key event. Backspace is swallowed when only a single empty
    /// item remains, keeping the list parseable; the rich-formatting
    /// shortcuts are disabled as everywhere else.
    pub fn filter_key(&self, key: Key, ctrl: bool) -> KeyAction {
        match key {
            Key::Backspace if self.focused && self.is_single_empty_item() => KeyAction::Suppress,
            Key::Char(c) if ctrl && matches!(c.to_ascii_lowercase(), 'b' | 'i' | 'u') => {
                KeyAction::Suppress
            }
            _ => KeyAction::Allow,
        }
    }

    fn is_single_empty_item(&self) -> bool {
        let mut lines = self.text.split('\n');
        matches!((lines.next(), lines.next()), (Some(""), None))
    }
}
