//! Field classification.

use crate::keywords::{find_password_keyword, find_pii_keyword, pii_for_input_type, PiiKind};
use crate::limits::{truncate_chars, MAX_VALUE_LEN};
use crate::masking::{mask_for, mask_secret, overlay_masks};
use crate::patterns::{scan_and_mask, PatternScan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How sensitive a captured value is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityLevel {
    #[default]
    Public,
    /// PII; masked when the caller excludes PII or a value pattern matched.
    Confidential,
    /// Password-like; always masked.
    Restricted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    Financial,
    Identity,
    Contact,
    Location,
    Medical,
    Biometric,
    Authentication,
    #[default]
    General,
}

impl FieldCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCategory::Financial => "financial",
            FieldCategory::Identity => "identity",
            FieldCategory::Contact => "contact",
            FieldCategory::Location => "location",
            FieldCategory::Medical => "medical",
            FieldCategory::Biometric => "biometric",
            FieldCategory::Authentication => "authentication",
            FieldCategory::General => "general",
        }
    }
}

impl std::fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes of the input element a value came from. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
}

impl FieldMetadata {
    pub fn with_type(field_type: impl Into<String>) -> Self {
        Self {
            field_type: Some(field_type.into()),
            ..Default::default()
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn normalized_type(&self) -> String {
        self.field_type
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// Lower-cased descriptive attributes joined for keyword search.
    fn haystack(&self) -> String {
        [
            &self.name,
            &self.id,
            &self.placeholder,
            &self.class_name,
            &self.autocomplete,
        ]
        .into_iter()
        .flatten()
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputClassification {
    pub level: SensitivityLevel,
    pub category: FieldCategory,
    pub tags: BTreeSet<String>,
    /// The only form of the value that may be shown, stored or transmitted.
    pub masked_value: String,
    pub was_masked: bool,
}

impl InputClassification {
    fn new(level: SensitivityLevel, category: FieldCategory, masked_value: String) -> Self {
        Self {
            level,
            category,
            tags: BTreeSet::new(),
            masked_value,
            was_masked: false,
        }
    }

    fn tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag.to_string());
        self
    }

    fn masked(mut self) -> Self {
        self.was_masked = true;
        self
    }

    fn with_scan_tags(mut self, scan: &PatternScan) -> Self {
        if !scan.matched() {
            return self;
        }
        self = self.tag("pattern-match");
        for kind in &scan.kinds {
            self = self.tag(kind.as_str());
        }
        if scan.luhn_valid_cards > 0 {
            self = self.tag("luhn-valid");
        }
        self
    }

    fn truncated(self, truncated: bool) -> Self {
        if truncated {
            self.tag("truncated")
        } else {
            self
        }
    }
}

/// Decide how sensitive `value` is and produce its transmittable form.
///
/// Password-like fields are masked unconditionally. Metadata-detected PII is
/// masked only when `exclude_pii` is set. Card, SSN, phone and email
/// lookalikes inside the value are masked in every case, including on top
/// of PII masking. Values are scanned in full and truncated afterwards.
pub fn classify_field(
    metadata: &FieldMetadata,
    value: &str,
    exclude_pii: bool,
) -> InputClassification {
    let field_type = metadata.normalized_type();
    let haystack = metadata.haystack();

    let password_keyword = find_password_keyword(&haystack);
    if field_type == "password" || password_keyword.is_some() {
        tracing::debug!(
            field_type = %field_type,
            keyword = password_keyword,
            "restricted field masked"
        );
        return InputClassification::new(
            SensitivityLevel::Restricted,
            FieldCategory::Authentication,
            mask_secret(value),
        )
        .tag("password")
        .masked();
    }

    // Scan the whole value; truncating first could split a match.
    let scan = scan_and_mask(value);

    if exclude_pii {
        let pii = find_pii_keyword(&haystack).or_else(|| pii_for_input_type(&field_type));
        if let Some((category, kind)) = pii {
            tracing::debug!(%category, kind = kind.as_str(), "pii field masked");
            let masked = overlay_masks(&mask_for(kind, value), &scan.masked);
            let (masked, truncated) = truncate_chars(&masked, MAX_VALUE_LEN);
            let classification =
                InputClassification::new(SensitivityLevel::Confidential, category, masked)
                    .tag("pii")
                    .tag(kind.as_str())
                    .masked()
                    .with_scan_tags(&scan);
            return classification.truncated(truncated);
        }
    }

    let (masked, truncated) = truncate_chars(&scan.masked, MAX_VALUE_LEN);
    let classification = if scan.matched() {
        tracing::debug!(kinds = scan.kinds.len(), "value pattern masked");
        let category = category_for_kind(scan.kinds[0]);
        InputClassification::new(SensitivityLevel::Confidential, category, masked)
            .masked()
            .with_scan_tags(&scan)
    } else {
        InputClassification::new(SensitivityLevel::Public, FieldCategory::General, masked)
    };
    classification.truncated(truncated)
}

fn category_for_kind(kind: PiiKind) -> FieldCategory {
    match kind {
        PiiKind::CreditCard => FieldCategory::Financial,
        PiiKind::Ssn => FieldCategory::Identity,
        PiiKind::Phone | PiiKind::Email => FieldCategory::Contact,
        PiiKind::Other => FieldCategory::General,
    }
}
