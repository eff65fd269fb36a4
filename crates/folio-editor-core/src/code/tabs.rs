//! Multi-file (tabbed) code block editor.
//!
//! Every tab owns an independent session and surface; switching tabs only
//! changes which surface is shown, so undo history and scroll position
//! survive per tab. The payload array and the session list are kept in
//! step by this type: tab closes and reorders mutate the session list
//! directly, and any tab blur re-emits the whole payload array.
//!
//! Identity policy: when the payload array changes from outside (e.g. a
//! different document loads), sessions are matched to entries **by file
//! name**. This is deliberate: renaming a tab changes its matching key, so
//! an external reload carrying the old name gets a fresh session rather
//! than the renamed one.

use std::time::Duration;

use tracing::debug;
use web_time::Instant;

use folio_common::Config;

use crate::code::drag::{move_item, DragCommit, DragFrame, StripGeometry, TabDrag};
use crate::code::session::{CodeSession, DetectRequest};
use crate::code::surface::CodeSurface;
use crate::model::CodeEntry;
use crate::platform::{Clipboard, Notifier, Severity};
use crate::text_box::TextBox;
use crate::types::{EditMode, LangType};

/// An in-progress tab rename (double-click-to-edit on the tab label).
struct TabRename {
    index: usize,
    label: TextBox,
}

/// Editable/read-only multi-file code sample.
pub struct CodeFilesEditor<S: CodeSurface + Default> {
    sessions: Vec<CodeSession<S>>,
    active: usize,
    editable: bool,
    show_line_numbers: bool,
    language_menu_open: bool,
    config: Config,
    drag: Option<TabDrag>,
    rename: Option<TabRename>,
}

impl<S: CodeSurface + Default> CodeFilesEditor<S> {
    pub fn new(entries: Vec<CodeEntry>, editable: bool, config: Config) -> Self {
        let sessions = entries
            .into_iter()
            .map(|entry| CodeSession::new(entry, S::default(), editable, &config))
            .collect();
        Self {
            sessions,
            active: 0,
            editable,
            show_line_numbers: false,
            language_menu_open: false,
            config,
            drag: None,
            rename: None,
        }
    }

    /// The full tabs-to-payload array, in tab order.
    pub fn payload(&self) -> Vec<CodeEntry> {
        self.sessions.iter().map(|s| s.entry().clone()).collect()
    }

    pub fn tab_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn session(&self, index: usize) -> Option<&CodeSession<S>> {
        self.sessions.get(index)
    }

    pub fn session_mut(&mut self, index: usize) -> Option<&mut CodeSession<S>> {
        self.sessions.get_mut(index)
    }

    pub fn active_session(&self) -> Option<&CodeSession<S>> {
        self.sessions.get(self.active)
    }

    pub fn active_session_mut(&mut self) -> Option<&mut CodeSession<S>> {
        self.sessions.get_mut(self.active)
    }

    // === Tab bar ===

    /// Click on a tab. Ignored mid-drag (the release decides the active
    /// tab then).
    pub fn select_tab(&mut self, index: usize) {
        if self.drag.is_none() && index < self.sessions.len() {
            self.active = index;
        }
    }

    /// Add a blank plain-text tab and switch to it. `None` when the tab
    /// cap is reached.
    pub fn add_tab(&mut self) -> Option<usize> {
        if !self.editable || self.sessions.len() >= self.config.max_code_tabs {
            return None;
        }
        self.sessions.push(CodeSession::new(
            CodeEntry::default(),
            S::default(),
            self.editable,
            &self.config,
        ));
        self.active = self.sessions.len() - 1;
        Some(self.active)
    }

    /// Close a tab. Disabled when a single tab remains. The active index
    /// is fixed up the way the tab bar reads naturally: closing the last
    /// active tab activates the new last, closing below the active shifts
    /// it down.
    pub fn close_tab(&mut self, index: usize) -> bool {
        let len = self.sessions.len();
        if !self.editable || len <= 1 || index >= len {
            return false;
        }

        // Dropping the session abandons its pending detection.
        self.sessions.remove(index);

        self.active = if self.active == index {
            if index == len - 1 { len - 2 } else { index }
        } else if self.active > index {
            self.active - 1
        } else {
            self.active
        };
        true
    }

    /// Double-click on a tab label: start renaming it.
    pub fn begin_rename(&mut self, index: usize) {
        if !self.editable || index >= self.sessions.len() {
            return;
        }
        let mut label = TextBox::new(self.sessions[index].name().as_str(), true)
            .with_mode(EditMode::DoubleClick);
        label.double_click();
        self.rename = Some(TabRename { index, label });
    }

    /// Text input into the rename label.
    pub fn rename_text(&mut self, text: impl Into<String>) {
        if let Some(rename) = &mut self.rename {
            rename.label.set_text(text);
        }
    }

    /// Label blur: commit the rename (empty falls back to "untitled") and
    /// emit the payload.
    pub fn commit_rename(&mut self) -> Option<Vec<CodeEntry>> {
        let mut rename = self.rename.take()?;
        let text = rename.label.blur();
        let name = if text.is_empty() { "untitled".to_string() } else { text };
        self.sessions.get_mut(rename.index)?.set_name(name);
        Some(self.payload())
    }

    // === Editing ===

    /// Blur of one tab's surface: sync it and re-emit the whole array
    /// (closes and reorders have already mutated the session list).
    pub fn blur_tab(&mut self, index: usize) -> Vec<CodeEntry> {
        if let Some(session) = self.sessions.get_mut(index) {
            session.blur();
        }
        self.payload()
    }

    // === Status bar (active tab) ===

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

    pub fn select_language(&mut self, lang: LangType) {
        self.language_menu_open = false;
        if let Some(session) = self.sessions.get_mut(self.active) {
            session.select_language(lang);
        }
    }

    // === Read-only chrome ===

    /// Toggle the line-number gutter on every tab's surface without
    /// recreating any of them.
    pub fn toggle_line_numbers(&mut self) -> bool {
        self.show_line_numbers = !self.show_line_numbers;
        for session in &mut self.sessions {
            session.surface_mut().set_gutter(self.show_line_numbers);
        }
        self.show_line_numbers
    }

    /// Copy the active tab's code and confirm with a toast.
    pub fn copy_active(&self, clipboard: &mut impl Clipboard, notifier: &impl Notifier) {
        if let Some(session) = self.active_session() {
            clipboard.set_text(&session.entry().code);
            notifier.notify(
                Severity::Info,
                "Clipboard",
                "Code sample has been copied to clipboard.",
            );
        }
    }

    // === Language auto-detection pump ===

    /// Collect due classification requests across all tabs. Each session
    /// debounces independently.
    pub fn poll_detect(&mut self, now: Instant) -> Vec<(usize, DetectRequest)> {
        self.sessions
            .iter_mut()
            .enumerate()
            .filter_map(|(i, session)| session.poll_detect(now).map(|req| (i, req)))
            .collect()
    }

    pub fn apply_detection(&mut self, index: usize, generation: u64, lang_id: &str) {
        if let Some(session) = self.sessions.get_mut(index) {
            session.apply_detection(generation, lang_id);
        }
    }

    // === Drag-to-reorder ===

    /// Pointer down on a tab.
    pub fn press_tab(&mut self, index: usize, pointer_x: f64, geometry: &StripGeometry, now: Instant) {
        if !self.editable {
            return;
        }
        let hold = Duration::from_millis(self.config.drag_hold_ms);
        self.drag = TabDrag::press(index, pointer_x, geometry, now, hold);
    }

    /// Pointer moved while pressed. Returns the cosmetic frame once the
    /// hold delay has armed the drag.
    pub fn drag_to(
        &mut self,
        pointer_x: f64,
        now: Instant,
        geometry: &StripGeometry,
    ) -> Option<DragFrame> {
        self.drag
            .as_mut()
            .and_then(|drag| drag.drag_to(pointer_x, now, geometry))
    }

    /// Pointer released: commit the new order atomically and decide the
    /// active tab by index.
    pub fn release_drag(&mut self) -> Option<DragCommit> {
        let commit = self.drag.take()?.release();
        if commit.dragged && commit.from != commit.to {
            move_item(&mut self.sessions, commit.from, commit.to);
            debug!(from = commit.from, to = commit.to, "tab reordered");
        }
        self.active = commit.to.min(self.sessions.len().saturating_sub(1));
        Some(commit)
    }

    // === External reconciliation ===

    /// The payload array changed from outside (e.g. a different document
    /// loaded). Sessions are matched to entries by file name: matched
    /// sessions reload in place, unmatched entries get fresh sessions, and
    /// sessions whose name vanished are discarded (together with any
    /// pending detection).
    pub fn reconcile(&mut self, entries: Vec<CodeEntry>) {
        let mut pool = std::mem::take(&mut self.sessions);
        for entry in entries {
            match pool.iter().position(|s| s.name() == &entry.name) {
                Some(i) => {
                    let mut session = pool.remove(i);
                    session.reload(entry);
                    self.sessions.push(session);
                }
                None => {
                    self.sessions.push(CodeSession::new(
                        entry,
                        S::default(),
                        self.editable,
                        &self.config,
                    ));
                }
            }
        }
        self.active = self.active.min(self.sessions.len().saturating_sub(1));
    }
}
