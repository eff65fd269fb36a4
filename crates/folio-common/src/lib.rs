//! folio-common: shared foundation for the folio workspace.
//!
//! This crate provides:
//! - `Error` - the workspace error type
//! - `Config` - editor tunables with pluggable load/save backends
//! - `telemetry` - tracing setup

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{Config, FileStore, Loader, Saver};
pub use error::Error;
