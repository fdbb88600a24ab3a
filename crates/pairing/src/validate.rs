use crate::format::PairingFormat;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const EMPTY_CODE_ERROR: &str = "Invalid code format";
pub const UNRECOGNIZED_FORMAT_ERROR: &str = "Unrecognized code format";

struct Grammars {
    uuid: Regex,
    short: Regex,
    legacy: Regex,
}

fn grammars() -> &'static Grammars {
    static GRAMMARS: OnceLock<Grammars> = OnceLock::new();
    GRAMMARS.get_or_init(|| Grammars {
        uuid: Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .expect("uuid grammar is valid"),
        short: Regex::new(r"(?i)^[0-9a-f]{12}$").expect("short grammar is valid"),
        legacy: Regex::new(r"^[0-9]{6}$").expect("legacy grammar is valid"),
    })
}

/// Outcome of checking a pairing code. Never an error type: callers branch
/// on `valid` and surface `error` as an inline hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingValidation {
    pub valid: bool,
    pub format: PairingFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PairingValidation {
    fn accepted(format: PairingFormat) -> Self {
        Self {
            valid: true,
            format,
            error: None,
        }
    }

    fn rejected(error: &str) -> Self {
        Self {
            valid: false,
            format: PairingFormat::Unknown,
            error: Some(error.to_string()),
        }
    }
}

/// Classify `code` as uuid, short or legacy.
///
/// No trimming is applied; surrounding whitespace makes a code invalid.
pub fn validate_pairing_code(code: &str) -> PairingValidation {
    if code.is_empty() {
        return PairingValidation::rejected(EMPTY_CODE_ERROR);
    }

    let g = grammars();
    let result = if g.uuid.is_match(code) {
        PairingValidation::accepted(PairingFormat::Uuid)
    } else if g.short.is_match(code) {
        PairingValidation::accepted(PairingFormat::Short)
    } else if g.legacy.is_match(code) {
        PairingValidation::accepted(PairingFormat::Legacy)
    } else {
        PairingValidation::rejected(UNRECOGNIZED_FORMAT_ERROR)
    };

    // Codes are credentials; log only their shape.
    tracing::debug!(
        len = code.len(),
        format = %result.format,
        valid = result.valid,
        "pairing code validated"
    );
    result
}

/// How a backend-issued code relates to the format the client asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormatReconciliation {
    Match,
    /// Asked for a UUID, got a short code, and short fallback is allowed.
    AcceptedFallback,
    Mismatch {
        requested: PairingFormat,
        issued: PairingFormat,
    },
}

/// Compare the requested format with what the backend actually issued.
pub fn reconcile_issued_format(
    requested: PairingFormat,
    issued: PairingFormat,
    allow_short_fallback: bool,
) -> FormatReconciliation {
    if requested == issued {
        return FormatReconciliation::Match;
    }
    if requested == PairingFormat::Uuid && issued == PairingFormat::Short && allow_short_fallback
    {
        return FormatReconciliation::AcceptedFallback;
    }
    tracing::warn!(%requested, %issued, "backend issued unexpected pairing format");
    FormatReconciliation::Mismatch { requested, issued }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid() {
        let v = validate_pairing_code("550e8400-e29b-41d4-a716-446655440000");
        assert!(v.valid);
        assert_eq!(v.format, PairingFormat::Uuid);
        assert_eq!(v.error, None);
    }

    #[test]
    fn test_uuid_uppercase() {
        let v = validate_pairing_code("550E8400-E29B-41D4-A716-446655440000");
        assert_eq!(v.format, PairingFormat::Uuid);
    }

    #[test]
    fn test_short() {
        let v = validate_pairing_code("a1b2c3d4e5f6");
        assert!(v.valid);
        assert_eq!(v.format, PairingFormat::Short);
    }

    #[test]
    fn test_legacy() {
        let v = validate_pairing_code("123456");
        assert!(v.valid);
        assert_eq!(v.format, PairingFormat::Legacy);
    }

    #[test]
    fn test_twelve_digits_is_short_not_legacy() {
        assert_eq!(
            validate_pairing_code("123456789012").format,
            PairingFormat::Short
        );
    }

    #[test]
    fn test_rejects_garbage() {
        let v = validate_pairing_code("not-a-code");
        assert!(!v.valid);
        assert_eq!(v.format, PairingFormat::Unknown);
        assert_eq!(v.error.as_deref(), Some(UNRECOGNIZED_FORMAT_ERROR));
    }

    #[test]
    fn test_rejects_empty() {
        let v = validate_pairing_code("");
        assert!(!v.valid);
        assert_eq!(v.format, PairingFormat::Unknown);
        assert_eq!(v.error.as_deref(), Some(EMPTY_CODE_ERROR));
    }

    #[test]
    fn test_rejects_near_misses() {
        for code in [
            "12345",
            "1234567",
            "12345a",
            " 123456",
            "123456\n",
            "a1b2c3d4e5f",
            "a1b2c3d4e5f6a",
            "g1b2c3d4e5f6",
            "550e8400e29b41d4a716446655440000",
            "550e8400-e29b-41d4-a716-44665544000",
            "{550e8400-e29b-41d4-a716-446655440000}",
        ] {
            let v = validate_pairing_code(code);
            assert!(!v.valid, "{code:?} should be rejected");
            assert_eq!(v.format, PairingFormat::Unknown);
        }
    }

    #[test]
    fn test_serialization_omits_error_when_valid() {
        let json = serde_json::to_string(&validate_pairing_code("123456")).unwrap();
        assert_eq!(json, r#"{"valid":true,"format":"legacy"}"#);
    }

    #[test]
    fn test_reconcile() {
        use PairingFormat::*;
        assert_eq!(reconcile_issued_format(Uuid, Uuid, false), FormatReconciliation::Match);
        assert_eq!(
            reconcile_issued_format(Uuid, Short, true),
            FormatReconciliation::AcceptedFallback
        );
        assert_eq!(
            reconcile_issued_format(Uuid, Short, false),
            FormatReconciliation::Mismatch {
                requested: Uuid,
                issued: Short
            }
        );
        assert_eq!(
            reconcile_issued_format(Short, Legacy, true),
            FormatReconciliation::Mismatch {
                requested: Short,
                issued: Legacy
            }
        );
    }
}
