//! # Settings Error Types
//!
//! Failures while decoding or encoding settings records and rule files.
//! Domain validation (name taken, last profile, ...) is not an error: it is
//! reported through [`crate::store::ProfileActionResult`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while handling settings data.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings record was not valid JSON for this schema.
    #[error("invalid settings record: {0}")]
    InvalidRecord(#[from] serde_json::Error),

    /// A TOML document could not be decoded.
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// A value could not be encoded as TOML.
    #[error("failed to encode TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// A rule file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
