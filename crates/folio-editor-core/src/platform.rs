//! Collaborator traits for editor operations.
//!
//! These traits define the interface between the editor core and the
//! application's external services: document persistence, image upload,
//! language classification, notifications, and the clipboard. The core
//! never knows what backs them (remote API, local disk, a web worker);
//! implementations live with the host.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use smol_str::SmolStr;
use tokio::sync::RwLock;

use folio_common::Error;

use crate::model::Document;

/// Key-value document persistence, keyed by document id.
pub trait DocumentStore {
    /// Load a document. `Ok(None)` when the id does not exist.
    fn load(&self, id: &str) -> impl Future<Output = Result<Option<Document>, Error>> + Send;

    /// Persist a document, replacing any previous version.
    fn save(&self, document: &Document) -> impl Future<Output = Result<(), Error>> + Send;

    /// Delete a document. Deleting a missing id is not an error.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), Error>> + Send;

    /// Mint a fresh unique document id.
    fn generate_id(&self) -> String;
}

/// A locally picked file awaiting upload; the core only ever holds
/// reference strings, never file bytes.
#[derive(Clone, Debug)]
pub struct LocalImage {
    pub name: String,
    pub mime: String,
    /// Ephemeral preview reference (e.g. an object URL).
    pub preview_url: String,
}

/// Turns a local file into a durable reference URL.
pub trait ImageUploader {
    fn upload(&self, image: &LocalImage) -> impl Future<Output = Result<String, Error>> + Send;
}

/// Classification failure; never fatal for the editor.
#[derive(thiserror::Error, Debug)]
#[error("language classification failed: {0}")]
pub struct ClassifyError(pub String);

/// Guesses the language of a code blob. Long-lived, one instance per
/// active code session; the debounce in the session guarantees at most
/// one outstanding call, so no request multiplexing is needed.
pub trait LanguageClassifier {
    /// Best-guess language id for the text. Empty or unrecognized ids are
    /// treated as plain text by the caller.
    fn classify(&self, text: &str) -> impl Future<Output = Result<SmolStr, ClassifyError>> + Send;
}

/// Severity of a transient user notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Fire-and-forget transient message sink.
pub trait Notifier {
    fn notify(&self, severity: Severity, title: &str, message: &str);
}

/// System clipboard access.
pub trait Clipboard {
    fn set_text(&mut self, text: &str);
}

/// In-memory [`DocumentStore`] for tests and headless use.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, Document>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    async fn load(&self, id: &str) -> Result<Option<Document>, Error> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn save(&self, document: &Document) -> Result<(), Error> {
        self.documents
            .write()
            .await
            .insert(document.id.clone(), document.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.documents.write().await.remove(id);
        Ok(())
    }

    fn generate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("doc-{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentKind;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let id = store.generate_id();
        let mut doc = Document::new(id.clone(), DocumentKind::Article);
        doc.title = "Hello".to_string();

        store.save(&doc).await.unwrap();
        let loaded = store.load(&id).await.unwrap().expect("saved document");
        assert_eq!(loaded, doc);

        store.delete(&id).await.unwrap();
        assert!(store.load(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_document_is_none() {
        let store = MemoryStore::new();
        assert!(store.load("nope").await.unwrap().is_none());
        // Deleting a missing id is fine.
        store.delete("nope").await.unwrap();
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let store = MemoryStore::new();
        let a = store.generate_id();
        let b = store.generate_id();
        assert_ne!(a, b);
    }
}
