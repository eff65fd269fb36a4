//! Image gallery surface.
//!
//! Zero or more images with per-image captions and a shared carousel
//! position. File intake happens through the host (file picker or drop);
//! the surface only sees MIME-typed preview references and emits the
//! updated entry array immediately on append.

use tracing::debug;

use crate::model::ImageEntry;
use crate::text_box::TextBox;

/// MIME types the drop target and picker accept.
pub const SUPPORTED_IMAGE_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/gif",
    "image/svg+xml",
];

/// Whether a MIME type is in the accepted whitelist.
pub fn is_supported_mime(mime: &str) -> bool {
    SUPPORTED_IMAGE_TYPES.contains(&mime)
}

/// A file the host picked or dropped, already materialized as an ephemeral
/// preview reference. Durable upload is the host's concern.
#[derive(Clone, Debug)]
pub struct PickedImage {
    pub mime: String,
    pub preview_url: String,
}

/// Editable/read-only image gallery.
#[derive(Debug)]
pub struct ImageBox {
    entries: Vec<ImageEntry>,
    position: usize,
    editable: bool,
    caption: TextBox,
    placeholder: String,
    /// Nested drag-enter/leave depth; the highlight only drops when the
    /// pointer has left every nested child.
    drag_depth: u32,
    drag_highlight: bool,
}

impl ImageBox {
    pub fn new(entries: Vec<ImageEntry>, editable: bool, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        let caption = caption_box(&entries, 0, editable, &placeholder);
        Self {
            entries,
            position: 0,
            editable,
            caption,
            placeholder,
            drag_depth: 0,
            drag_highlight: false,
        }
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&ImageEntry> {
        self.entries.get(self.position)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the drop target is currently highlighted.
    pub fn drag_highlighted(&self) -> bool {
        self.drag_highlight
    }

    /// External payload update (e.g. document reload); resets the carousel.
    pub fn set_entries(&mut self, entries: Vec<ImageEntry>) {
        self.entries = entries;
        self.position = 0;
        self.sync_caption();
    }

    /// Carousel navigation; out-of-range positions clamp.
    pub fn set_position(&mut self, position: usize) {
        self.position = clamp_position(position, self.entries.len());
        self.sync_caption();
    }

    // === File intake ===

    /// Pointer with files entered the drop target or one of its children.
    pub fn drag_enter(&mut self, any_supported: bool) {
        self.drag_depth += 1;
        if any_supported {
            self.drag_highlight = true;
        }
    }

    /// Pointer left the drop target or one of its children.
    pub fn drag_leave(&mut self) {
        self.drag_depth = self.drag_depth.saturating_sub(1);
        if self.drag_depth == 0 {
            self.drag_highlight = false;
        }
    }

    /// Files dropped: append the supported ones and emit the new array.
    pub fn drop_files(&mut self, picked: Vec<PickedImage>) -> Vec<ImageEntry> {
        self.drag_depth = 0;
        self.drag_highlight = false;
        self.add_images(picked)
    }

    /// Append picked files (drop or picker), skipping unsupported MIME
    /// types, and emit the updated array immediately.
    pub fn add_images(&mut self, picked: Vec<PickedImage>) -> Vec<ImageEntry> {
        if !self.editable {
            return self.entries.clone();
        }
        for image in picked {
            if !is_supported_mime(&image.mime) {
                debug!(mime = %image.mime, "skipping unsupported image type");
                continue;
            }
            self.entries.push(ImageEntry::new(image.preview_url));
        }
        self.sync_caption();
        self.entries.clone()
    }

    /// Remove the image currently in view and emit the new array. The
    /// carousel position clamps to the new last index.
    pub fn remove_current(&mut self) -> Vec<ImageEntry> {
        if self.editable && self.position < self.entries.len() {
            self.entries.remove(self.position);
            self.position = clamp_position(self.position, self.entries.len());
            self.sync_caption();
        }
        self.entries.clone()
    }

    // === Caption editing (through the text surface) ===

    pub fn focus_caption(&mut self) {
        self.caption.focus();
    }

    pub fn set_caption_text(&mut self, text: impl Into<String>) {
        self.caption.set_text(text);
    }

    /// Caption blur: store the text on the image currently in view and
    /// emit the whole array.
    pub fn blur_caption(&mut self) -> Vec<ImageEntry> {
        let text = self.caption.blur();
        if let Some(entry) = self.entries.get_mut(self.position) {
            entry.caption = text;
        }
        self.entries.clone()
    }

    /// Read-only caption markup for the image in view.
    pub fn rendered_caption(&self) -> String {
        self.caption.rendered()
    }

    /// Caption surface display text (placeholder-aware).
    pub fn caption_display(&self) -> &str {
        self.caption.display_text()
    }

    fn sync_caption(&mut self) {
        self.caption = caption_box(&self.entries, self.position, self.editable, &self.placeholder);
    }
}

fn caption_box(
    entries: &[ImageEntry],
    position: usize,
    editable: bool,
    placeholder: &str,
) -> TextBox {
    let caption = entries
        .get(position)
        .map(|entry| entry.caption.clone())
        .unwrap_or_default();
    TextBox::new(caption, editable).with_placeholder(placeholder)
}

fn clamp_position(position: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        position.min(len - 1)
    }
}
