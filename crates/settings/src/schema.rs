//! Settings document.

use crate::error::{SettingsError, SettingsResult};
use quill_analysis::{
    DEFAULT_IDLE_RESET_MS, DEFAULT_RUN_ON_THRESHOLD, DEFAULT_TRIGGER_KEYWORDS,
    DEFAULT_TYPING_THRESHOLD,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TYPING_ANALYSIS_DELAY_MS: u64 = 500;
pub const DEFAULT_OVERLAY_DURATION_MS: u64 = 3000;
pub const DEFAULT_BACKEND_URL: &str = "https://api.myl.zip";

/// User preferences.
///
/// Missing fields take their defaults, so older files keep loading as new
/// fields are added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Keystrokes per window above which typing counts as high intensity.
    pub typing_threshold: u32,
    /// Debounce between the last keystroke and an analysis pass.
    pub typing_analysis_delay_ms: u64,
    /// Pause after which the keystroke window starts over.
    pub typing_idle_reset_ms: u64,
    /// How long a suggestion stays on screen.
    pub overlay_duration_ms: u64,
    pub enable_typing_aware_service: bool,
    pub enable_run_on_detection: bool,
    /// Minimum run-on score (0-100) that flags text.
    pub run_on_threshold: u8,
    pub response_trigger_keywords: Vec<String>,
    /// Mask metadata-detected PII before anything leaves the device.
    pub exclude_pii: bool,
    /// Accept a short pairing code when a UUID was requested.
    pub allow_short_format_fallback: bool,
    pub backend_url: String,
    pub enable_debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            typing_threshold: DEFAULT_TYPING_THRESHOLD,
            typing_analysis_delay_ms: DEFAULT_TYPING_ANALYSIS_DELAY_MS,
            typing_idle_reset_ms: DEFAULT_IDLE_RESET_MS.unsigned_abs(),
            overlay_duration_ms: DEFAULT_OVERLAY_DURATION_MS,
            enable_typing_aware_service: true,
            enable_run_on_detection: true,
            run_on_threshold: DEFAULT_RUN_ON_THRESHOLD,
            response_trigger_keywords: DEFAULT_TRIGGER_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_pii: true,
            allow_short_format_fallback: true,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            enable_debug_logging: false,
        }
    }
}

impl Settings {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.run_on_threshold > 100 {
            return Err(invalid(
                "runOnThreshold",
                format!("{} is above 100", self.run_on_threshold),
            ));
        }
        if self.typing_threshold == 0 {
            return Err(invalid("typingThreshold", "must be at least 1".into()));
        }
        for (field, value) in [
            ("typingAnalysisDelayMs", self.typing_analysis_delay_ms),
            ("typingIdleResetMs", self.typing_idle_reset_ms),
            ("overlayDurationMs", self.overlay_duration_ms),
        ] {
            if value == 0 {
                return Err(invalid(field, "must be greater than zero".into()));
            }
        }
        if self.backend_url.trim().is_empty() {
            return Err(invalid("backendUrl", "must not be empty".into()));
        }
        Ok(())
    }

    /// Trigger keywords with blank entries dropped.
    pub fn trigger_keywords(&self) -> Vec<&str> {
        self.response_trigger_keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// Apply a partial JSON object on top of these settings.
    ///
    /// Only top-level keys present in `patch` change. The result is validated
    /// before it replaces `self`.
    pub fn merge_json(&mut self, patch: serde_json::Value) -> SettingsResult<()> {
        let serde_json::Value::Object(patch) = patch else {
            return Err(invalid("patch", "expected a JSON object".into()));
        };

        let mut current = serde_json::to_value(&*self).map_err(SettingsError::Serialize)?;
        if let serde_json::Value::Object(map) = &mut current {
            for (key, value) in patch {
                if !map.contains_key(&key) {
                    return Err(invalid("patch", format!("unknown setting '{key}'")));
                }
                map.insert(key, value);
            }
        }

        let merged: Settings = serde_json::from_value(current).map_err(SettingsError::Patch)?;
        merged.validate()?;
        *self = merged;
        Ok(())
    }
}

fn invalid(field: &'static str, message: String) -> SettingsError {
    SettingsError::InvalidValue { field, message }
}
