//! Error types for loading and saving settings.

use std::path::PathBuf;
use thiserror::Error;

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read or write the settings file.
    #[error("Failed to access settings file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid settings document.
    #[error("Invalid settings in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A patch could not be applied.
    #[error("Invalid settings patch: {0}")]
    Patch(#[source] serde_json::Error),

    /// The settings document could not be encoded.
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A value is outside its allowed range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },

    /// No platform config directory could be resolved.
    #[error("Could not determine a configuration directory")]
    NoConfigDir,
}
