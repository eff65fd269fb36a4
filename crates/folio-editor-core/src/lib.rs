//! folio-editor-core: the block document editor.
//!
//! This crate provides:
//! - `Document`/`Block`/`Payload` - the block data model and wire shape
//! - `Block::reassign_type` - the type-conversion engine
//! - `TextBox`/`ListBox`/`ImageBox` - the non-code block surfaces
//! - `CodeEditor`/`CodeFilesEditor` - code editing over the pluggable
//!   `CodeSurface` trait, with debounced language auto-detection
//! - `Container` - the per-block editing chrome
//! - `Editor` - the document owner and its mutation entry points
//! - collaborator traits for persistence, upload, classification,
//!   notifications, and the clipboard

pub mod code;
pub mod container;
pub mod convert;
pub mod dismiss;
pub mod editor;
pub mod image_box;
pub mod list_box;
pub mod model;
pub mod platform;
pub mod text_box;
pub mod types;

pub use code::{CodeEditor, CodeFilesEditor, CodeSession, CodeSurface, PlainSurface};
pub use container::Container;
pub use convert::TypeChange;
pub use dismiss::DismissRegistry;
pub use editor::{alignment_for, notify_load_warnings, placeholder_for, EditError, Editor};
pub use image_box::{is_supported_mime, ImageBox, PickedImage, SUPPORTED_IMAGE_TYPES};
pub use list_box::ListBox;
pub use model::{
    Block, BlockId, CodeEntry, Document, DocumentKind, ImageEntry, ModelError, Payload,
    PayloadWarning,
};
pub use platform::{
    Clipboard, ClassifyError, DocumentStore, ImageUploader, LanguageClassifier, LocalImage,
    MemoryStore, Notifier, Severity,
};
pub use text_box::{Key, KeyAction, TextBox};
pub use types::{
    Accent, Alignment, BlockType, Category, CursorPos, EditMode, FilterKind, IndentWidth,
    LangType,
};
