//! Per-block editing chrome.
//!
//! Wraps every block with the uniform affordances: type label, type
//! switcher, Add Below / Remove actions, and active highlighting. The
//! container is not part of the data model; it only gates what the UI
//! offers for the block it wraps.

use crate::model::{Block, Payload};
use crate::types::{Accent, BlockType, FilterKind};

/// Chrome state for one block.
#[derive(Debug, Clone)]
pub struct Container {
    kind: BlockType,
    filter: FilterKind,
    editable: bool,
    active: bool,
    removable: bool,
    fixed_type: bool,
    type_menu_open: bool,
}

impl Container {
    pub fn new(block: &Block, editable: bool) -> Self {
        Self {
            kind: block.kind(),
            filter: filter_kind(block),
            editable,
            active: false,
            removable: true,
            fixed_type: false,
            type_menu_open: false,
        }
    }

    /// The title container: type locked, not removable.
    pub fn for_title(block: &Block, editable: bool) -> Self {
        let mut container = Self::new(block, editable);
        container.removable = false;
        container.fixed_type = true;
        container
    }

    /// Re-derive the chrome after the block's payload or type changed.
    pub fn refresh(&mut self, block: &Block) {
        self.kind = block.kind();
        self.filter = filter_kind(block);
        if !self.can_change_type() {
            self.type_menu_open = false;
        }
    }

    /// Label shown in the chrome header.
    pub fn label(&self) -> &'static str {
        self.kind.display_name()
    }

    pub fn accent(&self) -> Option<Accent> {
        self.kind.accent()
    }

    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The wrapped block gained or lost focus.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// The switcher is suppressed for the title block and for blocks whose
    /// content has locked their shape (populated gallery, multi-file code).
    pub fn can_change_type(&self) -> bool {
        self.editable && !self.fixed_type && self.filter == FilterKind::All
    }

    /// Remove is disabled for the title block and in read-only mode.
    pub fn can_remove(&self) -> bool {
        self.editable && self.removable
    }

    /// Types offered by the switcher menu.
    pub fn available_types(&self) -> &'static [BlockType] {
        if self.can_change_type() { &BlockType::ALL } else { &[] }
    }

    pub fn type_menu_open(&self) -> bool {
        self.type_menu_open
    }

    pub fn toggle_type_menu(&mut self) -> bool {
        if self.can_change_type() {
            self.type_menu_open = !self.type_menu_open;
        }
        self.type_menu_open
    }

    /// Dismiss-on-outside-interaction hook.
    pub fn close_type_menu(&mut self) {
        self.type_menu_open = false;
    }
}

/// Derive the switcher filter from the block's content.
fn filter_kind(block: &Block) -> FilterKind {
    match block.payload() {
        Payload::Images(entries) if !entries.is_empty() => FilterKind::ImageOnly,
        Payload::CodeFiles(entries) if entries.len() > 1 => FilterKind::CodeOnly,
        _ => FilterKind::All,
    }
}
