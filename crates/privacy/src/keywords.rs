//! Field metadata keyword tables.

use crate::classify::FieldCategory;
use serde::{Deserialize, Serialize};

/// Substrings of a field's name, id, placeholder or class that mark it as a
/// secret. Case-insensitive.
pub const PASSWORD_KEYWORDS: &[&str] = &[
    "password",
    "passwd",
    "pwd",
    "pass",
    "secret",
    "key",
    "token",
    "auth",
    "credential",
    "login",
    "signin",
    "pin",
    "code",
];

/// Which masking strategy a PII value gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PiiKind {
    CreditCard,
    Ssn,
    Phone,
    Email,
    /// Anything else (addresses, medical details): fully masked.
    Other,
}

impl PiiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PiiKind::CreditCard => "credit-card",
            PiiKind::Ssn => "ssn",
            PiiKind::Phone => "phone",
            PiiKind::Email => "email",
            PiiKind::Other => "pii",
        }
    }
}

/// PII keyword groups, checked in order; more specific entries come first.
pub(crate) const PII_KEYWORDS: &[(&str, FieldCategory, PiiKind)] = &[
    // financial
    ("creditcard", FieldCategory::Financial, PiiKind::CreditCard),
    ("credit-card", FieldCategory::Financial, PiiKind::CreditCard),
    ("credit_card", FieldCategory::Financial, PiiKind::CreditCard),
    ("cardnumber", FieldCategory::Financial, PiiKind::CreditCard),
    ("card-number", FieldCategory::Financial, PiiKind::CreditCard),
    ("card_number", FieldCategory::Financial, PiiKind::CreditCard),
    ("cc-number", FieldCategory::Financial, PiiKind::CreditCard),
    ("ccnum", FieldCategory::Financial, PiiKind::CreditCard),
    ("card", FieldCategory::Financial, PiiKind::CreditCard),
    ("cvv", FieldCategory::Financial, PiiKind::Other),
    ("cvc", FieldCategory::Financial, PiiKind::Other),
    ("iban", FieldCategory::Financial, PiiKind::Other),
    ("routing", FieldCategory::Financial, PiiKind::Other),
    ("account", FieldCategory::Financial, PiiKind::Other),
    ("bank", FieldCategory::Financial, PiiKind::Other),
    // identity
    ("ssn", FieldCategory::Identity, PiiKind::Ssn),
    ("social-security", FieldCategory::Identity, PiiKind::Ssn),
    ("social_security", FieldCategory::Identity, PiiKind::Ssn),
    ("socialsecurity", FieldCategory::Identity, PiiKind::Ssn),
    ("passport", FieldCategory::Identity, PiiKind::Other),
    ("license", FieldCategory::Identity, PiiKind::Other),
    ("taxid", FieldCategory::Identity, PiiKind::Other),
    ("tax-id", FieldCategory::Identity, PiiKind::Other),
    ("national-id", FieldCategory::Identity, PiiKind::Other),
    ("birth", FieldCategory::Identity, PiiKind::Other),
    ("dob", FieldCategory::Identity, PiiKind::Other),
    // contact
    ("email", FieldCategory::Contact, PiiKind::Email),
    ("e-mail", FieldCategory::Contact, PiiKind::Email),
    ("phone", FieldCategory::Contact, PiiKind::Phone),
    ("mobile", FieldCategory::Contact, PiiKind::Phone),
    ("cell", FieldCategory::Contact, PiiKind::Phone),
    ("fax", FieldCategory::Contact, PiiKind::Phone),
    // location
    ("address", FieldCategory::Location, PiiKind::Other),
    ("street", FieldCategory::Location, PiiKind::Other),
    ("city", FieldCategory::Location, PiiKind::Other),
    ("postal", FieldCategory::Location, PiiKind::Other),
    ("postcode", FieldCategory::Location, PiiKind::Other),
    ("zip", FieldCategory::Location, PiiKind::Other),
    ("latitude", FieldCategory::Location, PiiKind::Other),
    ("longitude", FieldCategory::Location, PiiKind::Other),
    // medical
    ("medical", FieldCategory::Medical, PiiKind::Other),
    ("diagnosis", FieldCategory::Medical, PiiKind::Other),
    ("patient", FieldCategory::Medical, PiiKind::Other),
    ("insurance", FieldCategory::Medical, PiiKind::Other),
    ("prescription", FieldCategory::Medical, PiiKind::Other),
    ("health", FieldCategory::Medical, PiiKind::Other),
    // biometric
    ("biometric", FieldCategory::Biometric, PiiKind::Other),
    ("fingerprint", FieldCategory::Biometric, PiiKind::Other),
    ("faceid", FieldCategory::Biometric, PiiKind::Other),
    ("retina", FieldCategory::Biometric, PiiKind::Other),
    ("voiceprint", FieldCategory::Biometric, PiiKind::Other),
];

/// HTML input types that imply a PII kind without any keyword.
pub(crate) fn pii_for_input_type(field_type: &str) -> Option<(FieldCategory, PiiKind)> {
    match field_type {
        "email" => Some((FieldCategory::Contact, PiiKind::Email)),
        "tel" => Some((FieldCategory::Contact, PiiKind::Phone)),
        _ => None,
    }
}

/// First password keyword contained in `haystack` (already lower-cased).
pub(crate) fn find_password_keyword(haystack: &str) -> Option<&'static str> {
    PASSWORD_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| haystack.contains(keyword))
}

/// First PII entry whose keyword is contained in `haystack` (already lower-cased).
pub(crate) fn find_pii_keyword(haystack: &str) -> Option<(FieldCategory, PiiKind)> {
    PII_KEYWORDS
        .iter()
        .find(|(keyword, _, _)| haystack.contains(keyword))
        .map(|(_, category, kind)| (*category, *kind))
}
