//! Top-level document editor.
//!
//! Owns the in-memory [`Document`] and funnels every mutation through a
//! handful of entry points (insert, remove, type change, payload edit),
//! so block editors never hold aliased references into the block list.
//! Persistence is explicit: nothing here auto-saves.

use tracing::{debug, warn};

use folio_common::Error;

use crate::convert::TypeChange;
use crate::image_box::is_supported_mime;
use crate::model::{
    Block, BlockId, Document, DocumentKind, ImageEntry, ModelError, Payload, PayloadWarning,
};
use crate::platform::{DocumentStore, ImageUploader, LocalImage, Notifier, Severity};
use crate::types::{Alignment, BlockType};

/// Errors from editor block operations.
#[derive(thiserror::Error, Debug)]
pub enum EditError {
    #[error("unknown block id: {0}")]
    UnknownBlock(BlockId),

    #[error("block is not an image gallery")]
    NotAnImageBlock,

    #[error(transparent)]
    Payload(#[from] ModelError),
}

/// The editor: one document, edited by one actor.
pub struct Editor {
    document: Document,
}

impl Editor {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Create an editor over a fresh empty document, with an id minted by
    /// the store.
    pub fn create(store: &impl DocumentStore, kind: DocumentKind) -> Self {
        Self::new(Document::new(store.generate_id(), kind))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn blocks(&self) -> &[Block] {
        &self.document.blocks
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.document.blocks.iter().find(|b| b.id() == id)
    }

    // === Title (the reserved first position) ===

    /// The synthesized title block. Not part of the block list: it cannot
    /// be removed or retyped, and its edits land on the document title.
    pub fn title_block(&self) -> Block {
        Block {
            id: BlockId::from("title"),
            kind: BlockType::Title,
            payload: Payload::Text(self.document.title.clone()),
        }
    }

    /// Title blur.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.document.title = title.into();
    }

    // === Metadata ===

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.document.description = description.into();
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.document.tags = tags;
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.document.categories = categories;
    }

    pub fn set_published(&mut self, published: bool) {
        self.document.published = published;
    }

    // === Block operations ===

    /// Insert a fresh empty paragraph below the anchor block, or at the
    /// first position when the anchor is the title (`None`). Returns the
    /// new block's id, or `None` for an unknown anchor.
    pub fn insert_below(&mut self, anchor: Option<&BlockId>) -> Option<BlockId> {
        let position = match anchor {
            None => 0,
            Some(id) => self.position_of(id)? + 1,
        };
        let block = Block::new(BlockType::Paragraph);
        let id = block.id().clone();
        self.document.blocks.insert(position, block);
        Some(id)
    }

    /// Remove a block. The title block never appears in the list, so it
    /// is unreachable here by construction.
    pub fn remove(&mut self, id: &BlockId) -> bool {
        match self.position_of(id) {
            Some(position) => {
                self.document.blocks.remove(position);
                true
            }
            None => false,
        }
    }

    /// Change a block's type through the conversion engine.
    pub fn change_type(&mut self, id: &BlockId, new_type: BlockType) -> Option<TypeChange> {
        let position = self.position_of(id)?;
        let change = self.document.blocks[position].reassign_type(new_type);
        if change.discarded_entries > 0 {
            warn!(
                block = %id,
                discarded = change.discarded_entries,
                "lossy type conversion dropped code entries"
            );
        }
        Some(change)
    }

    /// Apply a block editor's blur payload. The single mutation entry
    /// point for block content; the payload shape is checked against the
    /// block's type.
    pub fn apply_edit(&mut self, id: &BlockId, payload: Payload) -> Result<(), EditError> {
        let position = self
            .position_of(id)
            .ok_or_else(|| EditError::UnknownBlock(id.clone()))?;
        self.document.blocks[position].set_payload(payload)?;
        Ok(())
    }

    /// Upload picked files and append the successful ones to an image
    /// block. A failed upload appends nothing for that file; the block is
    /// never left half-updated. Returns how many entries were appended.
    pub async fn attach_images(
        &mut self,
        id: &BlockId,
        files: &[LocalImage],
        uploader: &impl ImageUploader,
    ) -> Result<usize, EditError> {
        let position = self
            .position_of(id)
            .ok_or_else(|| EditError::UnknownBlock(id.clone()))?;
        if !matches!(self.document.blocks[position].payload(), Payload::Images(_)) {
            return Err(EditError::NotAnImageBlock);
        }

        let mut uploaded = Vec::new();
        for file in files {
            if !is_supported_mime(&file.mime) {
                debug!(mime = %file.mime, "skipping unsupported image type");
                continue;
            }
            match uploader.upload(file).await {
                Ok(url) => uploaded.push(ImageEntry::new(url)),
                Err(err) => warn!(file = %file.name, %err, "image upload failed"),
            }
        }

        let appended = uploaded.len();
        if let Payload::Images(entries) = &mut self.document.blocks[position].payload {
            entries.extend(uploaded);
        }
        Ok(appended)
    }

    // === Persistence ===

    /// Persist the document, stamping the modification time.
    pub async fn save(&mut self, store: &impl DocumentStore) -> Result<(), Error> {
        self.document.modified_at = chrono::Utc::now();
        store.save(&self.document).await
    }

    /// Load a document from the store.
    pub async fn load(store: &impl DocumentStore, id: &str) -> Result<Option<Editor>, Error> {
        Ok(store.load(id).await?.map(Editor::new))
    }

    /// Decode a document from raw JSON leniently, substituting defaults
    /// for malformed blocks and returning the per-block warnings.
    pub fn load_json(json: &str) -> Result<(Editor, Vec<PayloadWarning>), serde_json::Error> {
        let (document, warnings) = Document::from_json_lenient(json)?;
        for warning in &warnings {
            warn!(block = %warning.block_id, kind = %warning.kind, detail = %warning.detail,
                "block payload could not be loaded");
        }
        Ok((Editor::new(document), warnings))
    }

    fn position_of(&self, id: &BlockId) -> Option<usize> {
        self.document.blocks.iter().position(|b| b.id() == id)
    }
}

/// Surface lenient-load warnings as non-fatal notifications.
pub fn notify_load_warnings(warnings: &[PayloadWarning], notifier: &impl Notifier) {
    for warning in warnings {
        notifier.notify(
            Severity::Warning,
            "Document",
            &format!(
                "Content could not be loaded for a {} block.",
                warning.kind.display_name()
            ),
        );
    }
}

/// Content alignment for a block type.
pub fn alignment_for(kind: BlockType) -> Option<Alignment> {
    match kind {
        BlockType::Title => Some(Alignment::Center),
        BlockType::Subtitle1 | BlockType::Subtitle2 => Some(Alignment::Left),
        BlockType::Paragraph
        | BlockType::Tips
        | BlockType::Warning
        | BlockType::Important
        | BlockType::ListNumber
        | BlockType::ListBullet => Some(Alignment::Justify),
        _ => None,
    }
}

/// Placeholder text for a block type's text surface.
pub fn placeholder_for(kind: BlockType) -> Option<&'static str> {
    match kind {
        BlockType::Title => Some("Enter a title"),
        BlockType::Image => Some("Enter a description"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::model::{CodeEntry, DocumentKind};
    use crate::platform::MemoryStore;
    use crate::types::LangType;

    struct TestUploader {
        fail_name: Option<String>,
    }

    impl ImageUploader for TestUploader {
        async fn upload(&self, image: &LocalImage) -> Result<String, Error> {
            if self.fail_name.as_deref() == Some(image.name.as_str()) {
                return Err(Error::upload("connection reset"));
            }
            Ok(format!("https://cdn/{}", image.name))
        }
    }

    struct TestNotifier {
        messages: RefCell<Vec<String>>,
    }

    impl Notifier for TestNotifier {
        fn notify(&self, _severity: Severity, _title: &str, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
    }

    fn editor_with_blocks() -> Editor {
        let mut editor = Editor::new(Document::new("doc-1", DocumentKind::Article));
        editor.set_title("Hello");
        editor.insert_below(None);
        editor
    }

    fn local(name: &str, mime: &str) -> LocalImage {
        LocalImage {
            name: name.to_string(),
            mime: mime.to_string(),
            preview_url: format!("blob:{name}"),
        }
    }

    #[test]
    fn test_insert_below_title_lands_first() {
        let mut editor = editor_with_blocks();
        let first = editor.blocks()[0].id().clone();

        let second = editor.insert_below(None).unwrap();
        assert_eq!(editor.blocks()[0].id(), &second);
        assert_eq!(editor.blocks()[1].id(), &first);
        assert_eq!(editor.blocks()[0].kind(), BlockType::Paragraph);
    }

    #[test]
    fn test_insert_below_block() {
        let mut editor = editor_with_blocks();
        let anchor = editor.blocks()[0].id().clone();
        let new_id = editor.insert_below(Some(&anchor)).unwrap();
        assert_eq!(editor.blocks()[1].id(), &new_id);

        assert!(editor.insert_below(Some(&BlockId::from("missing"))).is_none());
    }

    #[test]
    fn test_remove_block() {
        let mut editor = editor_with_blocks();
        let id = editor.blocks()[0].id().clone();
        assert!(editor.remove(&id));
        assert!(editor.blocks().is_empty());
        assert!(!editor.remove(&id));
    }

    #[test]
    fn test_change_type_runs_conversion() {
        let mut editor = editor_with_blocks();
        let id = editor.blocks()[0].id().clone();
        editor
            .apply_edit(&id, Payload::Text("Hello\nWorld".to_string()))
            .unwrap();

        let change = editor.change_type(&id, BlockType::ListBullet).unwrap();
        assert!(change.changed);
        assert_eq!(
            editor.block(&id).unwrap().payload(),
            &Payload::List(vec!["Hello".to_string(), "World".to_string()])
        );
    }

    #[test]
    fn test_apply_edit_checks_shape_and_id() {
        let mut editor = editor_with_blocks();
        let id = editor.blocks()[0].id().clone();

        let err = editor
            .apply_edit(&id, Payload::Code(CodeEntry::default()))
            .unwrap_err();
        assert!(matches!(err, EditError::Payload(_)));

        let err = editor
            .apply_edit(&BlockId::from("missing"), Payload::Text(String::new()))
            .unwrap_err();
        assert!(matches!(err, EditError::UnknownBlock(_)));
    }

    #[test]
    fn test_title_block_is_synthetic() {
        let editor = editor_with_blocks();
        let title = editor.title_block();
        assert_eq!(title.kind(), BlockType::Title);
        assert_eq!(title.payload(), &Payload::Text("Hello".to_string()));
        // Not in the block list, so remove cannot reach it.
        assert!(!editor.blocks().iter().any(|b| b.kind() == BlockType::Title));
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let store = MemoryStore::new();
        let mut editor = editor_with_blocks();
        let id = editor.blocks()[0].id().clone();
        editor
            .apply_edit(&id, Payload::Text("body".to_string()))
            .unwrap();
        editor.set_tags(vec!["rust".to_string()]);

        editor.save(&store).await.unwrap();
        let loaded = Editor::load(&store, "doc-1").await.unwrap().expect("saved");
        assert_eq!(loaded.document(), editor.document());

        assert!(Editor::load(&store, "other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_attach_images_is_per_file_atomic() {
        let mut editor = editor_with_blocks();
        let id = editor.blocks()[0].id().clone();
        editor.change_type(&id, BlockType::Image);

        let uploader = TestUploader {
            fail_name: Some("two.png".to_string()),
        };
        let appended = editor
            .attach_images(
                &id,
                &[
                    local("one.png", "image/png"),
                    local("two.png", "image/png"),
                    local("notes.txt", "text/plain"),
                    local("three.png", "image/png"),
                ],
                &uploader,
            )
            .await
            .unwrap();

        assert_eq!(appended, 2);
        match editor.block(&id).unwrap().payload() {
            Payload::Images(entries) => {
                let urls: Vec<_> = entries.iter().map(|e| e.url.as_str()).collect();
                assert_eq!(urls, vec!["https://cdn/one.png", "https://cdn/three.png"]);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_attach_images_rejects_non_image_block() {
        let mut editor = editor_with_blocks();
        let id = editor.blocks()[0].id().clone();
        let uploader = TestUploader { fail_name: None };
        let err = editor
            .attach_images(&id, &[local("a.png", "image/png")], &uploader)
            .await
            .unwrap_err();
        assert!(matches!(err, EditError::NotAnImageBlock));
    }

    #[test]
    fn test_lenient_load_notifies_per_block() {
        let json = serde_json::to_string(&{
            let mut editor = editor_with_blocks();
            let id = editor.blocks()[0].id().clone();
            editor
                .apply_edit(&id, Payload::Text("fine".to_string()))
                .unwrap();
            editor.into_document()
        })
        .unwrap();

        // Corrupt the block's data shape.
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["blocks"][0]["data"] = serde_json::json!(42);

        let (editor, warnings) = Editor::load_json(&value.to_string()).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            editor.blocks()[0].payload(),
            &Payload::Text(String::new())
        );

        let notifier = TestNotifier {
            messages: RefCell::new(Vec::new()),
        };
        notify_load_warnings(&warnings, &notifier);
        let messages = notifier.messages.borrow();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("could not be loaded"));
        assert!(messages[0].contains("Paragraph"));
    }

    #[test]
    fn test_presentation_defaults() {
        assert_eq!(alignment_for(BlockType::Title), Some(Alignment::Center));
        assert_eq!(alignment_for(BlockType::Subtitle1), Some(Alignment::Left));
        assert_eq!(alignment_for(BlockType::Paragraph), Some(Alignment::Justify));
        assert_eq!(alignment_for(BlockType::Code), None);

        assert_eq!(placeholder_for(BlockType::Title), Some("Enter a title"));
        assert_eq!(placeholder_for(BlockType::Image), Some("Enter a description"));
        assert_eq!(placeholder_for(BlockType::Paragraph), None);
    }

    #[test]
    fn test_lossy_conversion_is_reported() {
        let mut editor = editor_with_blocks();
        let id = editor.blocks()[0].id().clone();
        editor.change_type(&id, BlockType::CodeFiles);
        editor
            .apply_edit(
                &id,
                Payload::CodeFiles(vec![
                    CodeEntry::new("a.ts", "x", LangType::Ts),
                    CodeEntry::new("b.ts", "y", LangType::Ts),
                    CodeEntry::new("c.ts", "z", LangType::Ts),
                ]),
            )
            .unwrap();

        let change = editor.change_type(&id, BlockType::Code).unwrap();
        assert_eq!(change.discarded_entries, 2);
        assert_eq!(
            editor.block(&id).unwrap().payload(),
            &Payload::Code(CodeEntry::new("a.ts", "x", LangType::Ts))
        );
    }
}
