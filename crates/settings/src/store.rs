//! Loading and saving the settings file.

use crate::error::{SettingsError, SettingsResult};
use crate::schema::Settings;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// `<config dir>/quill/settings.json` for the current platform.
pub fn default_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("quill").join(SETTINGS_FILE_NAME))
        .ok_or(SettingsError::NoConfigDir)
}

/// Settings bound to the file they were loaded from.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let settings = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
                path: path.clone(),
                source,
            })?;
            let settings: Settings =
                serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                    path: path.clone(),
                    source,
                })?;
            settings.validate()?;
            tracing::debug!(path = %path.display(), "loaded settings");
            settings
        } else {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        };
        Ok(Self { path, settings })
    }

    /// Load from [`default_path`].
    pub fn load_default() -> SettingsResult<Self> {
        Self::load(default_path()?)
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Replace the settings after validating them. Does not persist.
    pub fn set(&mut self, settings: Settings) -> SettingsResult<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Apply a partial JSON update and persist it.
    ///
    /// The in-memory settings change only once the file is written.
    pub fn update_json(&mut self, patch: serde_json::Value) -> SettingsResult<()> {
        let mut next = self.settings.clone();
        next.merge_json(patch)?;
        self.write(&next)?;
        self.settings = next;
        Ok(())
    }

    /// Write the current settings as pretty JSON, creating parent directories.
    pub fn save(&self) -> SettingsResult<()> {
        self.write(&self.settings)
    }

    fn write(&self, settings: &Settings) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let json = serde_json::to_string_pretty(settings).map_err(SettingsError::Serialize)?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).map_err(|source| self.io_error(source))?;
        std::fs::rename(&temp_path, &self.path).map_err(|source| self.io_error(source))?;

        tracing::info!(path = %self.path.display(), "saved settings");
        Ok(())
    }

    /// Write defaults if no file exists yet. Returns `true` when a file was created.
    pub fn ensure_file(&self) -> SettingsResult<bool> {
        if self.exists() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Restore defaults and persist.
    pub fn reset(&mut self) -> SettingsResult<()> {
        let defaults = Settings::default();
        self.write(&defaults)?;
        self.settings = defaults;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
