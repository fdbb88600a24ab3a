//! Subcommand implementations.
//!
//! Each command returns a serializable value; printing is left to `main`.

use crate::args::{ClassifyArgs, ValidateKind};
use quill_analysis::{
    analyze_with_buffer, classify_severity, score_run_on_thought, Severity, TypingAnalysisResult,
};
use quill_events::{
    emit_event, event_names, Activity, EventBus, FieldCapturedEvent, PairingValidatedEvent,
};
use quill_pairing::{
    reconcile_issued_format, validate_pairing_code, FormatReconciliation, PairingFormat,
    PairingValidation,
};
use quill_privacy::validators::{
    is_valid_credit_card, is_valid_email, is_valid_phone_number, is_valid_ssn, is_valid_uuid,
    password_strength,
};
use quill_privacy::{classify_field, FieldMetadata, InputClassification};
use quill_settings::{Settings, SettingsStore};
use serde::Serialize;

/// Score no longer flags anything once run-on detection is off.
const DISABLED_RUN_ON_THRESHOLD: u8 = 100;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreOutput {
    pub score: u8,
    pub severity: Severity,
}

pub fn score(text: &str, buffer: usize) -> ScoreOutput {
    let score = score_run_on_thought(text, buffer);
    ScoreOutput {
        score,
        severity: classify_severity(score),
    }
}

/// Run-on threshold after applying the detection toggle.
pub fn effective_threshold(settings: &Settings, threshold: Option<u8>) -> u8 {
    if !settings.enable_run_on_detection {
        return DISABLED_RUN_ON_THRESHOLD;
    }
    threshold.unwrap_or(settings.run_on_threshold)
}

pub fn analyze(
    settings: &Settings,
    text: &str,
    threshold: Option<u8>,
    keywords: Option<&[String]>,
    buffer: usize,
) -> TypingAnalysisResult {
    let threshold = effective_threshold(settings, threshold);
    match keywords {
        Some(keywords) => analyze_with_buffer(text, buffer, keywords, threshold),
        None => {
            let keywords = settings.trigger_keywords();
            analyze_with_buffer(text, buffer, &keywords[..], threshold)
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairOutput {
    #[serde(flatten)]
    pub validation: PairingValidation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconciliation: Option<FormatReconciliation>,
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Validate `code` and announce the verdict. The code itself is never emitted.
pub fn pair(
    settings: &Settings,
    code: &str,
    requested: Option<PairingFormat>,
    bus: &dyn EventBus,
) -> PairOutput {
    let validation = validate_pairing_code(code);

    let event = PairingValidatedEvent::new(&validation, now_ms());
    emit_event(bus, event_names::PAIRING_VALIDATED, &event);
    Activity::pairing(&event).publish(bus);

    let reconciliation = requested
        .filter(|_| validation.valid)
        .map(|r| reconcile_issued_format(r, validation.format, settings.allow_short_format_fallback));
    PairOutput {
        validation,
        reconciliation,
    }
}

impl PairOutput {
    /// Accepted as-is or via the short fallback.
    pub fn accepted(&self) -> bool {
        self.validation.valid
            && !matches!(
                self.reconciliation,
                Some(FormatReconciliation::Mismatch { .. })
            )
    }
}

/// Classify the value and announce its masked form.
pub fn classify(
    settings: &Settings,
    args: &ClassifyArgs,
    bus: &dyn EventBus,
) -> InputClassification {
    let metadata = FieldMetadata {
        field_type: args.field_type.clone(),
        name: args.name.clone(),
        id: args.id.clone(),
        placeholder: args.placeholder.clone(),
        class_name: args.class_name.clone(),
        autocomplete: args.autocomplete.clone(),
    };
    let exclude_pii = settings.exclude_pii && !args.include_pii;
    let classification = classify_field(&metadata, &args.value, exclude_pii);

    let field = args.name.clone().or_else(|| args.id.clone());
    let event = FieldCapturedEvent::new(field, &classification, now_ms());
    emit_event(bus, event_names::FIELD_CAPTURED, &event);
    Activity::field_capture(&event).publish(bus);

    classification
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOutput {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<u8>,
}

pub fn validate(kind: ValidateKind, value: &str) -> ValidateOutput {
    let valid = match kind {
        ValidateKind::Email => is_valid_email(value),
        ValidateKind::Phone => is_valid_phone_number(value),
        ValidateKind::Card => is_valid_credit_card(value),
        ValidateKind::Ssn => is_valid_ssn(value),
        ValidateKind::Uuid => is_valid_uuid(value),
        ValidateKind::Password => {
            let strength = password_strength(value);
            return ValidateOutput {
                valid: strength >= 3,
                strength: Some(strength),
            };
        }
    };
    ValidateOutput {
        valid,
        strength: None,
    }
}

/// Apply a JSON patch to the store and announce the changed keys.
pub fn update_settings(
    store: &mut SettingsStore,
    patch: &str,
    bus: &dyn EventBus,
) -> anyhow::Result<Settings> {
    let patch: serde_json::Value = serde_json::from_str(patch)?;
    let keys: Vec<String> = patch
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();

    store.update_json(patch)?;
    tracing::info!(keys = ?keys, "settings updated");
    emit_event(bus, event_names::SETTINGS_UPDATED, store.get());
    Activity::settings_change(keys).publish(bus);
    Ok(store.get().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_analysis::ContextTag;
    use quill_events::{InMemoryEventBus, NullEventBus};
    use quill_privacy::SensitivityLevel;

    #[test]
    fn test_score_output() {
        let out = score("", 0);
        assert_eq!(out.score, 0);
        assert_eq!(out.severity, Severity::Low);

        let out = score("short", 250);
        assert_eq!(out.score, 20);
    }

    #[test]
    fn test_analyze_uses_settings_keywords() {
        let settings = Settings::default();
        let r = analyze(&settings, "any recommendations", None, None, 0);
        assert_eq!(r.context, Some(ContextTag::KeywordTrigger));

        let custom = vec!["deadline".to_string()];
        let r = analyze(&settings, "the deadline", None, Some(&custom), 0);
        assert!(r.has_trigger_keywords);
        let r = analyze(&settings, "any recommendations", None, Some(&custom), 0);
        assert!(!r.has_trigger_keywords);
    }

    #[test]
    fn test_run_on_detection_toggle() {
        let settings = Settings {
            enable_run_on_detection: false,
            ..Default::default()
        };
        assert_eq!(effective_threshold(&settings, Some(10)), 100);
        let r = analyze(&settings, &"word and ".repeat(20), None, None, 500);
        assert!(!r.is_run_on_thought);
    }

    #[test]
    fn test_pair_with_fallback() {
        let settings = Settings::default();
        let bus = NullEventBus;
        let out = pair(&settings, "a1b2c3d4e5f6", Some(PairingFormat::Uuid), &bus);
        assert_eq!(out.reconciliation, Some(FormatReconciliation::AcceptedFallback));
        assert!(out.accepted());

        let strict = Settings {
            allow_short_format_fallback: false,
            ..Default::default()
        };
        let out = pair(&strict, "a1b2c3d4e5f6", Some(PairingFormat::Uuid), &bus);
        assert!(!out.accepted());

        let out = pair(&settings, "nope", Some(PairingFormat::Uuid), &bus);
        assert!(out.reconciliation.is_none());
        assert!(!out.accepted());
    }

    #[test]
    fn test_pair_output_is_flat() {
        let out = pair(&Settings::default(), "123456", None, &NullEventBus);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["format"], "legacy");
        assert!(json.get("reconciliation").is_none());
    }

    #[test]
    fn test_classify_include_pii_override() {
        let settings = Settings::default();
        let args = ClassifyArgs {
            value: "221B Baker Street".into(),
            name: Some("address".into()),
            ..Default::default()
        };
        let bus = NullEventBus;
        assert_eq!(classify(&settings, &args, &bus).level, SensitivityLevel::Confidential);

        let args = ClassifyArgs {
            include_pii: true,
            ..args
        };
        assert_eq!(classify(&settings, &args, &bus).level, SensitivityLevel::Public);
    }

    #[test]
    fn test_validate_kinds() {
        assert!(validate(ValidateKind::Card, "4111 1111 1111 1111").valid);
        assert!(!validate(ValidateKind::Ssn, "000-12-3456").valid);
        let out = validate(ValidateKind::Password, "Str0ng!Passw0rd");
        assert_eq!(out.strength, Some(5));
        assert!(out.valid);
    }

    #[test]
    fn test_update_settings_emits_event() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = SettingsStore::load(dir.path().join("settings.json")).unwrap();
        let bus = InMemoryEventBus::new();

        let updated = update_settings(&mut store, r#"{"runOnThreshold": 60}"#, &bus).unwrap();
        assert_eq!(updated.run_on_threshold, 60);

        let updates = bus.events_for(event_names::SETTINGS_UPDATED);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].payload["runOnThreshold"], 60);
        let feed = bus.events_for(event_names::ACTIVITY);
        assert_eq!(feed[0].payload["content"]["keys"][0], "runOnThreshold");

        assert!(update_settings(&mut store, "not json", &bus).is_err());
        assert_eq!(bus.len(), 2);
    }

    #[test]
    fn test_pair_emits_verdict_without_code() {
        let bus = InMemoryEventBus::new();
        pair(&Settings::default(), "a1b2c3d4e5f6", None, &bus);

        let verdicts = bus.events_for(event_names::PAIRING_VALIDATED);
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].payload["format"], "short");
        assert_eq!(bus.events_for(event_names::ACTIVITY).len(), 1);
        for e in bus.events() {
            assert!(!e.payload.to_string().contains("a1b2c3d4e5f6"));
        }
    }

    #[test]
    fn test_classify_emits_masked_capture() {
        let bus = InMemoryEventBus::new();
        let args = ClassifyArgs {
            value: "hunter22".into(),
            field_type: Some("password".into()),
            id: Some("pw".into()),
            ..Default::default()
        };
        classify(&Settings::default(), &args, &bus);

        let captures = bus.events_for(event_names::FIELD_CAPTURED);
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].payload["field"], "pw");
        assert_eq!(captures[0].payload["value"], "********");
        let feed = bus.events_for(event_names::ACTIVITY);
        assert_eq!(feed[0].payload["type"], "field_capture");
        for e in bus.events() {
            assert!(!e.payload.to_string().contains("hunter22"));
        }
    }
}
