//! Shared event contracts between the Quill core and its hosts.
//!
//! This crate defines the DTOs the core hands to a browser extension, a
//! desktop shell or the CLI. Using shared types prevents runtime
//! deserialization errors from mismatched field names.
//!
//! Also provides the `EventBus` trait for decoupled event emission.

mod activity;
mod bus;

pub use activity::{Activity, ActivityContent, ActivityStatus, ActivityType};
pub use bus::{emit_event, EmittedEvent, EventBus, EventBusRef, InMemoryEventBus, NullEventBus};

use quill_analysis::{ContextTag, Severity, TypingAnalysisResult, TypingIntensity};
use quill_pairing::{PairingFormat, PairingValidation};
use quill_privacy::{FieldCategory, InputClassification, SensitivityLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Event emitted when typing analysis produces a suggestion.
///
/// Producers: typing-aware service
/// Consumers: overlay UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistSuggestionEvent {
    pub context: ContextTag,
    pub message: String,
    pub confidence: f32,
    pub run_on_score: u8,
    /// Present only for run-on thoughts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<TypingIntensity>,
    pub timestamp_ms: i64,
}

impl AssistSuggestionEvent {
    /// Build the event for a result that needs attention; `None` otherwise.
    pub fn from_analysis(result: &TypingAnalysisResult, timestamp_ms: i64) -> Option<Self> {
        if !result.needs_attention {
            return None;
        }
        let context = result.context?;
        Some(Self {
            context,
            message: result.suggested_response.clone(),
            confidence: result.confidence,
            run_on_score: result.run_on_score,
            severity: result.is_run_on_thought.then_some(result.severity),
            intensity: None,
            timestamp_ms,
        })
    }

    pub fn with_intensity(mut self, intensity: TypingIntensity) -> Self {
        self.intensity = Some(intensity);
        self
    }
}

/// Event emitted after a pairing code was checked locally.
///
/// Carries the verdict only, never the code itself.
///
/// Producers: pairing form
/// Consumers: frontend, backend client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingValidatedEvent {
    pub valid: bool,
    pub format: PairingFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp_ms: i64,
}

impl PairingValidatedEvent {
    pub fn new(validation: &PairingValidation, timestamp_ms: i64) -> Self {
        Self {
            valid: validation.valid,
            format: validation.format,
            error: validation.error.clone(),
            timestamp_ms,
        }
    }
}

/// Event emitted when a form field value is captured.
///
/// `value` is always the classified, possibly masked form. There is no
/// constructor taking a raw value.
///
/// Producers: input capture
/// Consumers: activity feed, backend sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCapturedEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub level: SensitivityLevel,
    pub category: FieldCategory,
    pub tags: BTreeSet<String>,
    pub value: String,
    pub was_masked: bool,
    pub timestamp_ms: i64,
}

impl FieldCapturedEvent {
    pub fn new(
        field: Option<String>,
        classification: &InputClassification,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            field,
            level: classification.level,
            category: classification.category,
            tags: classification.tags.clone(),
            value: classification.masked_value.clone(),
            was_masked: classification.was_masked,
            timestamp_ms,
        }
    }
}

/// Event names as constants to prevent typos.
pub mod event_names {
    /// A suggestion should be shown to the user.
    pub const ASSIST_SUGGESTION: &str = "typing:suggestion";
    /// Full analysis result for a snapshot.
    pub const TYPING_ANALYSIS: &str = "typing:analysis";
    /// Typing intensity changed.
    pub const TYPING_INTENSITY: &str = "typing:intensity";
    /// Pairing code checked.
    pub const PAIRING_VALIDATED: &str = "pairing:validated";
    /// Field value captured.
    pub const FIELD_CAPTURED: &str = "privacy:field_captured";
    /// Settings changed.
    pub const SETTINGS_UPDATED: &str = "settings:updated";
    /// New activity feed entry.
    pub const ACTIVITY: &str = "activity:new";
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_analysis::analyze_with_buffer;
    use quill_pairing::validate_pairing_code;
    use quill_privacy::{classify_field, FieldMetadata};

    const KEYWORDS: [&str; 5] = ["help", "assist", "guide", "suggest", "recommend"];

    #[test]
    fn test_suggestion_only_when_attention_needed() {
        let quiet = analyze_with_buffer("hello", 0, &KEYWORDS, 50);
        assert!(AssistSuggestionEvent::from_analysis(&quiet, 1).is_none());

        let flagged = analyze_with_buffer("can you help me", 0, &KEYWORDS, 50);
        let event = AssistSuggestionEvent::from_analysis(&flagged, 1).unwrap();
        assert_eq!(event.context, ContextTag::KeywordTrigger);
        assert_eq!(event.severity, None);
        assert_eq!(event.message, flagged.suggested_response);
    }

    #[test]
    fn test_suggestion_serializes_camel_case() {
        let result = analyze_with_buffer("why?", 0, &KEYWORDS, 50);
        let event = AssistSuggestionEvent::from_analysis(&result, 42)
            .unwrap()
            .with_intensity(TypingIntensity::Active);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["context"], "question");
        assert_eq!(json["intensity"], "active");
        assert_eq!(json["timestampMs"], 42);
        assert!(json.get("severity").is_none());
    }

    #[test]
    fn test_pairing_event_omits_code() {
        let event = PairingValidatedEvent::new(&validate_pairing_code("123456"), 7);
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("123456"));
        assert!(json.contains("\"format\":\"legacy\""));
    }

    #[test]
    fn test_field_captured_never_carries_raw_secret() {
        let classification =
            classify_field(&FieldMetadata::with_type("password"), "hunter22", false);
        let event = FieldCapturedEvent::new(Some("pw".into()), &classification, 0);
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("hunter22"));
        assert_eq!(event.value, "********");
        assert_eq!(event.level, SensitivityLevel::Restricted);
    }
}
