//! Error types shared across the folio workspace.

use miette::Diagnostic;

/// Main error type for folio operations.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum Error {
    /// Document store failure (backend-specific message).
    #[error("document store error: {0}")]
    Store(String),

    /// The requested document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),

    /// Image upload failure (backend-specific message).
    #[error("image upload error: {0}")]
    Upload(String),

    /// Configuration could not be loaded or saved.
    #[error("config error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a store error from any displayable backend error.
    pub fn store(err: impl std::fmt::Display) -> Self {
        Self::Store(err.to_string())
    }

    /// Build an upload error from any displayable backend error.
    pub fn upload(err: impl std::fmt::Display) -> Self {
        Self::Upload(err.to_string())
    }
}
