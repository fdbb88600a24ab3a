//! Format validators for form input.
//!
//! These only check shape; whether a value is *real* is the backend's call.

use regex::Regex;
use std::sync::OnceLock;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"))
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone regex is valid"))
}

fn uuid_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
            .expect("uuid regex is valid")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email.trim())
}

/// International phone numbers; spaces, dashes and parentheses are ignored.
pub fn is_valid_phone_number(phone: &str) -> bool {
    let cleaned: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    phone_re().is_match(&cleaned)
}

/// 13 to 19 digits passing the Luhn checksum; spaces and dashes are ignored.
pub fn is_valid_credit_card(number: &str) -> bool {
    let cleaned: String = number.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    if !(13..=19).contains(&cleaned.len()) {
        return false;
    }

    let mut sum = 0u32;
    let mut double = false;
    for c in cleaned.chars().rev() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        double = !double;
    }
    sum % 10 == 0
}

/// Nine digits, excluding area numbers 000, 666 and 900-999, group 00 and serial 0000.
pub fn is_valid_ssn(ssn: &str) -> bool {
    let cleaned: String = ssn.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    if cleaned.len() != 9 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let (area, rest) = cleaned.split_at(3);
    let (group, serial) = rest.split_at(2);
    !(area == "000" || area == "666" || area.starts_with('9') || group == "00" || serial == "0000")
}

/// RFC 4122 UUID with a version 1-5 and the standard variant.
pub fn is_valid_uuid(uuid: &str) -> bool {
    uuid_re().is_match(uuid)
}

const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Password strength score from 0 to 5.
pub fn password_strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }

    let len = password.chars().count();
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    let checks = [
        len >= 8,
        len >= 12,
        lower,
        upper,
        digit,
        special,
        len > 8 && lower && upper,
        len > 8 && digit && special,
    ];
    let score = checks.iter().filter(|&&ok| ok).count();
    score.min(5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("  user.name+tag@example.com "));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_phone() {
        assert!(is_valid_phone_number("+1 (555) 123-4567"));
        assert!(is_valid_phone_number("5551234567"));
        assert!(!is_valid_phone_number("0123"));
        assert!(!is_valid_phone_number("phone"));
    }

    #[test]
    fn test_credit_card_luhn() {
        assert!(is_valid_credit_card("4111 1111 1111 1111"));
        assert!(is_valid_credit_card("5500-0000-0000-0004"));
        assert!(!is_valid_credit_card("4111 1111 1111 1112"));
        assert!(!is_valid_credit_card("4111"));
        assert!(!is_valid_credit_card("4111 1111 1111 111x"));
    }

    #[test]
    fn test_ssn() {
        assert!(is_valid_ssn("123-45-6789"));
        assert!(!is_valid_ssn("000-45-6789"));
        assert!(!is_valid_ssn("666-45-6789"));
        assert!(!is_valid_ssn("900-45-6789"));
        assert!(!is_valid_ssn("123-00-6789"));
        assert!(!is_valid_ssn("123-45-0000"));
        assert!(!is_valid_ssn("12-345-678"));
    }

    #[test]
    fn test_uuid_requires_version_and_variant() {
        assert!(is_valid_uuid("550e8400-e29b-41d4-a716-446655440000"));
        // version nibble 0 is not RFC 4122
        assert!(!is_valid_uuid("550e8400-e29b-01d4-a716-446655440000"));
        // variant nibble c is not the standard variant
        assert!(!is_valid_uuid("550e8400-e29b-41d4-c716-446655440000"));
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(password_strength(""), 0);
        assert_eq!(password_strength("abc"), 1);
        assert_eq!(password_strength("Str0ng!Passw0rd"), 5);
    }
}
