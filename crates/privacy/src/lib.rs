//! Sensitivity classification for captured form-field values.
//!
//! Every value leaving an input field goes through [`classify_field`] before
//! it is stored or transmitted:
//! - Password-like fields are always masked, regardless of settings
//! - PII fields are masked when the caller asks for PII exclusion
//! - Values that *look* like cards, SSNs, phones or emails are masked even
//!   when the field metadata says nothing
//!
//! # Example
//!
//! ```
//! use quill_privacy::{classify_field, FieldMetadata, SensitivityLevel};
//!
//! let field = FieldMetadata::with_type("password");
//! let c = classify_field(&field, "secret123", false);
//! assert_eq!(c.level, SensitivityLevel::Restricted);
//! assert_eq!(c.masked_value, "********");
//! ```

mod classify;
mod keywords;
pub mod limits;
pub mod masking;
mod patterns;
pub mod validators;

pub use classify::{
    classify_field, FieldCategory, FieldMetadata, InputClassification, SensitivityLevel,
};
pub use keywords::{PiiKind, PASSWORD_KEYWORDS};
