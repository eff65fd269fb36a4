//! Editor configuration with pluggable load/save backends.

use serde::{Deserialize, Serialize};

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Tunables for the block editor.
///
/// Every field has a default matching the shipped behavior; hosts usually
/// load this once at startup and hand it to the editor components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Idle window before a language auto-detection request is dispatched,
    /// in milliseconds.
    pub detect_debounce_ms: u64,
    /// How long a tab must be held pressed before dragging arms, in
    /// milliseconds.
    pub drag_hold_ms: u64,
    /// Upper bound on code-files tabs per block.
    pub max_code_tabs: usize,
    /// Indent width code sessions start with (2 or 4).
    pub default_indent_spaces: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detect_debounce_ms: 1000,
            drag_hold_ms: 300,
            max_code_tabs: 10,
            default_indent_spaces: 4,
        }
    }
}

impl Config {
    /// Loads the configuration from the provided loader.
    pub async fn load(loader: &impl Loader) -> Result<Self, Error> {
        loader
            .load()
            .await
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Saves the configuration using the provided saver.
    pub async fn save(&self, saver: &impl Saver) -> Result<(), Error> {
        saver
            .save(self)
            .await
            .map_err(|e| Error::Config(e.to_string()))
    }
}

/// The trait for loading configuration data.
pub trait Loader {
    /// Loads the configuration data.
    fn load(
        &self,
    ) -> impl Future<
        Output = core::result::Result<Config, Box<dyn std::error::Error + Send + Sync + 'static>>,
    > + Send;
}

/// The trait for saving configuration data.
pub trait Saver {
    /// Saves the configuration data.
    fn save(
        &self,
        config: &Config,
    ) -> impl Future<
        Output = core::result::Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>,
    > + Send;
}

/// An implementation of [`Loader`] and [`Saver`] backed by a JSON file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a new [`FileStore`] with the given path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Loader for FileStore {
    async fn load(
        &self,
    ) -> core::result::Result<Config, Box<dyn std::error::Error + Send + Sync + 'static>> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Saver for FileStore {
    async fn save(
        &self,
        config: &Config,
    ) -> core::result::Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        let text = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.detect_debounce_ms, 1000);
        assert_eq!(config.drag_hold_ms, 300);
        assert_eq!(config.max_code_tabs, 10);
        assert_eq!(config.default_indent_spaces, 4);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"max_code_tabs": 4}"#).unwrap();
        assert_eq!(config.max_code_tabs, 4);
        assert_eq!(config.detect_debounce_ms, 1000);
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("config.json"));

        let mut config = Config::default();
        config.drag_hold_ms = 250;
        config.save(&store).await.unwrap();

        let loaded = Config::load(&store).await.unwrap();
        assert_eq!(loaded.drag_hold_ms, 250);
        assert_eq!(loaded.max_code_tabs, 10);
    }
}
