//! Single-line/flow text surface.
//!
//! Backs every plain-text editing site: block bodies, image captions, and
//! tab renames. The surface is a state machine around focus, placeholder
//! visibility, and the click vs double-click edit modes; the host wires it
//! to an actual content-editable element and feeds events through.

use folio_renderer::render_inline;

use crate::types::EditMode;

/// Keys the block editors care about filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
}

/// What the surface wants done with a key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Allow,
    Suppress,
}

/// Editable/read-only text surface with placeholder handling.
#[derive(Debug, Clone)]
pub struct TextBox {
    value: String,
    placeholder: Option<String>,
    editable: bool,
    mode: EditMode,
    focused: bool,
    /// Double-click mode only: whether the surface is currently editable.
    editing: bool,
    showing_placeholder: bool,
}

impl TextBox {
    pub fn new(value: impl Into<String>, editable: bool) -> Self {
        let mut this = Self {
            value: value.into(),
            placeholder: None,
            editable,
            mode: EditMode::Click,
            focused: false,
            editing: false,
            showing_placeholder: false,
        };
        this.refresh_placeholder();
        this
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        self.placeholder = (!placeholder.is_empty()).then_some(placeholder);
        self.refresh_placeholder();
        self
    }

    pub fn with_mode(mut self, mode: EditMode) -> Self {
        self.mode = mode;
        self
    }

    /// The stored value. Never contains the placeholder.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Text the surface currently displays: the placeholder (muted) when
    /// it is showing, the raw value otherwise.
    pub fn display_text(&self) -> &str {
        if self.showing_placeholder {
            self.placeholder.as_deref().unwrap_or_default()
        } else {
            &self.value
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn showing_placeholder(&self) -> bool {
        self.showing_placeholder
    }

    /// Whether the surface accepts input right now.
    pub fn accepts_input(&self) -> bool {
        match self.mode {
            EditMode::Click => self.editable,
            EditMode::DoubleClick => self.editable && self.editing,
        }
    }

    /// Read-only rendering of the value through the inline renderer.
    pub fn rendered(&self) -> String {
        render_inline(&self.value)
    }

    /// External value update (e.g. the document was reloaded). Resets the
    /// placeholder state; ignored while the user holds focus.
    pub fn set_value(&mut self, value: impl Into<String>) {
        if self.focused {
            return;
        }
        self.value = value.into();
        self.refresh_placeholder();
    }

    /// Text input from the host while editing.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.accepts_input() && self.focused {
            self.value = text.into();
        }
    }

    /// Focus gained. Clears a showing placeholder so typing starts empty.
    pub fn focus(&mut self) {
        if !self.accepts_input() {
            return;
        }
        if self.showing_placeholder {
            self.showing_placeholder = false;
            self.value.clear();
        }
        self.focused = true;
    }

    /// Double-click: switches a [`EditMode::DoubleClick`] surface into
    /// editing and focuses it. No-op in click mode.
    pub fn double_click(&mut self) {
        if self.mode != EditMode::DoubleClick || !self.editable || self.editing {
            return;
        }
        self.editing = true;
        self.focus();
    }

    /// Focus lost. Restores the placeholder when the value is empty,
    /// drops a double-click surface back to read-only, and returns the
    /// emitted value (the actual text, never the placeholder).
    pub fn blur(&mut self) -> String {
        self.focused = false;
        if self.mode == EditMode::DoubleClick {
            self.editing = false;
        }
        self.refresh_placeholder();
        self.value.clone()
    }

    /// Filter a key event. Enter never inserts a newline here, and the
    /// rich-formatting shortcuts are disabled: styling is expressed only
    /// through the inline markup syntax.
    pub fn filter_key(&self, key: Key, ctrl: bool) -> KeyAction {
        match key {
            Key::Enter => KeyAction::Suppress,
            Key::Char(c) if ctrl && matches!(c.to_ascii_lowercase(), 'b' | 'i' | 'u') => {
                KeyAction::Suppress
            }
            _ => KeyAction::Allow,
        }
    }

    fn refresh_placeholder(&mut self) {
        self.showing_placeholder =
            self.editable && self.value.is_empty() && self.placeholder.is_some();
    }
}
