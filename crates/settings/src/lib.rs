//! Persisted Quill preferences.
//!
//! Settings live in a single JSON document. Every field has a default, so a
//! partial or missing file is never an error; a malformed one is.

mod error;
mod schema;
mod store;

pub use error::{SettingsError, SettingsResult};
pub use schema::{
    Settings, DEFAULT_BACKEND_URL, DEFAULT_OVERLAY_DURATION_MS, DEFAULT_TYPING_ANALYSIS_DELAY_MS,
};
pub use store::{default_path, SettingsStore, SETTINGS_FILE_NAME};
