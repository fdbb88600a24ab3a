//! Masking strategies.

use crate::keywords::PiiKind;
use crate::limits::{MASK_CHAR, MAX_MASK_LEN};

/// Digits kept visible by the card, SSN and phone strategies.
pub const VISIBLE_TRAILING_DIGITS: usize = 4;

/// Fixed-length-capped mask: one `*` per character, at most eight.
pub fn mask_secret(value: &str) -> String {
    let len = value.chars().count().min(MAX_MASK_LEN);
    std::iter::repeat(MASK_CHAR).take(len).collect()
}

/// Mask every digit except the last `keep`, leaving separators in place.
///
/// Values with `keep` or fewer digits are fully masked.
pub fn mask_digits_keep_last(value: &str, keep: usize) -> String {
    let total_digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if total_digits == 0 {
        return mask_secret(value);
    }
    let visible_from = if total_digits > keep {
        total_digits - keep
    } else {
        total_digits
    };

    let mut seen = 0usize;
    value
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                let idx = seen;
                seen += 1;
                if idx < visible_from {
                    MASK_CHAR
                } else {
                    c
                }
            } else {
                c
            }
        })
        .collect()
}

/// Keep the first and last character of the local part and the whole domain.
pub fn mask_email(value: &str) -> String {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return mask_secret(value);
    };

    let chars: Vec<char> = local.chars().collect();
    let masked_local: String = match chars.len() {
        0 => String::new(),
        1 | 2 => std::iter::repeat(MASK_CHAR).take(chars.len()).collect(),
        n => {
            let mut out = String::with_capacity(local.len());
            out.push(chars[0]);
            out.extend(std::iter::repeat(MASK_CHAR).take(n - 2));
            out.push(chars[n - 1]);
            out
        }
    };

    format!("{masked_local}@{domain}")
}

pub fn mask_for(kind: PiiKind, value: &str) -> String {
    match kind {
        PiiKind::CreditCard | PiiKind::Ssn | PiiKind::Phone => {
            mask_digits_keep_last(value, VISIBLE_TRAILING_DIGITS)
        }
        PiiKind::Email => mask_email(value),
        PiiKind::Other => mask_secret(value),
    }
}

/// Combine two maskings of the same value, hiding every position either one hid.
///
/// Maskings of different lengths cannot be aligned; the result is then
/// `primary` if it is already fully masked, otherwise a secret mask.
pub fn overlay_masks(primary: &str, secondary: &str) -> String {
    if primary.chars().count() != secondary.chars().count() {
        if primary.chars().all(|c| c == MASK_CHAR) {
            return primary.to_string();
        }
        return mask_secret(primary);
    }
    primary
        .chars()
        .zip(secondary.chars())
        .map(|(a, b)| if a == MASK_CHAR || b == MASK_CHAR { MASK_CHAR } else { a })
        .collect()
}
