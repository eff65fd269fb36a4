//! Single-file code block editor.
//!
//! One session, one surface, plus the status-bar state (cursor position,
//! indent toggle, auto-detect toggle, language menu) and the read-only
//! copy affordance.

use folio_common::Config;

use crate::code::session::CodeSession;
use crate::code::surface::CodeSurface;
use crate::model::CodeEntry;
use crate::platform::{Clipboard, Notifier, Severity};
use crate::types::{CursorPos, LangType};

/// Editable/read-only single code sample.
pub struct CodeEditor<S: CodeSurface> {
    session: CodeSession<S>,
    language_menu_open: bool,
}

impl<S: CodeSurface> CodeEditor<S> {
    pub fn new(entry: CodeEntry, surface: S, editable: bool, config: &Config) -> Self {
        Self {
            session: CodeSession::new(entry, surface, editable, config),
            language_menu_open: false,
        }
    }

    pub fn session(&self) -> &CodeSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CodeSession<S> {
        &mut self.session
    }

    /// Surface blur: emits the current text and language tag.
    pub fn blur(&mut self) -> CodeEntry {
        self.session.blur()
    }

    // === Status bar ===

    pub fn cursor(&self) -> CursorPos {
        self.session.cursor()
    }

    pub fn indent_label(&self) -> String {
        format!("{} spaces", self.session.indent().spaces())
    }

    pub fn detect_label(&self) -> &'static str {
        if self.session.auto_detect() { "On" } else { "Off" }
    }

    pub fn language_label(&self) -> &'static str {
        self.session.language().display_name()
    }

    // === Language menu ===

    pub fn language_menu_open(&self) -> bool {
        self.language_menu_open
    }

    pub fn toggle_language_menu(&mut self) -> bool {
        self.language_menu_open = !self.language_menu_open;
        self.language_menu_open
    }

    /// Dismiss-on-outside-interaction hook.
    pub fn close_language_menu(&mut self) {
        self.language_menu_open = false;
    }

    /// Manual pick from the menu: closes it and disables auto-detection
    /// for this block going forward.
    pub fn select_language(&mut self, lang: LangType) {
        self.language_menu_open = false;
        self.session.select_language(lang);
    }

    // === Read-only chrome ===

    /// Copy the code sample to the clipboard and confirm with a toast.
    pub fn copy_code(&self, clipboard: &mut impl Clipboard, notifier: &impl Notifier) {
        clipboard.set_text(&self.session.entry().code);
        notifier.notify(
            Severity::Info,
            "Clipboard",
            "Code sample has been copied to clipboard.",
        );
    }
}
