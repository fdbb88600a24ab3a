//! Device pairing code validation.
//!
//! The backend is migrating pairing codes from a 6-digit legacy format,
//! through a 12-character hex short format, towards full UUIDs. Clients
//! must accept all three and reject anything else before spending a network
//! round-trip on verification.

mod format;
mod validate;

pub use format::{ParseFormatError, PairingFormat};
pub use validate::{
    reconcile_issued_format, validate_pairing_code, FormatReconciliation, PairingValidation,
    EMPTY_CODE_ERROR, UNRECOGNIZED_FORMAT_ERROR,
};
