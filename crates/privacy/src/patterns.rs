//! Metadata-blind value patterns.
//!
//! Applied to every non-restricted value: matches are masked in place with
//! the strategy of their kind, whatever the field claims to be.

use crate::keywords::PiiKind;
use crate::masking::mask_for;
use crate::validators::is_valid_credit_card;
use regex::Regex;
use std::sync::OnceLock;

struct ValuePatterns {
    email: Regex,
    ssn: Regex,
    card: Regex,
    phone: Regex,
}

fn patterns() -> &'static ValuePatterns {
    static PATTERNS: OnceLock<ValuePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| ValuePatterns {
        email: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("email pattern is valid"),
        ssn: Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").expect("ssn pattern is valid"),
        // 13 to 19 digits, optionally grouped by spaces or dashes
        card: Regex::new(r"\b(?:\d[ -]?){12,18}\d\b").expect("card pattern is valid"),
        phone: Regex::new(r"(?:\+\d{1,3}[ .-]?)?(?:\(\d{3}\)|\b\d{3})[ .-]?\d{3}[ .-]?\d{4}\b")
            .expect("phone pattern is valid"),
    })
}

#[derive(Debug, Default)]
pub(crate) struct PatternScan {
    pub masked: String,
    pub kinds: Vec<PiiKind>,
    /// Card-like numbers that also pass the Luhn check.
    pub luhn_valid_cards: usize,
}

impl PatternScan {
    pub fn matched(&self) -> bool {
        !self.kinds.is_empty()
    }
}

/// Mask every email, SSN, card and phone lookalike inside `value`.
///
/// Order matters: SSNs before cards before phones, so a masked SSN no longer
/// has enough digits to match the broader patterns.
pub(crate) fn scan_and_mask(value: &str) -> PatternScan {
    let p = patterns();
    let mut scan = PatternScan {
        masked: value.to_string(),
        ..Default::default()
    };

    for (re, kind) in [
        (&p.email, PiiKind::Email),
        (&p.ssn, PiiKind::Ssn),
        (&p.card, PiiKind::CreditCard),
        (&p.phone, PiiKind::Phone),
    ] {
        if !re.is_match(&scan.masked) {
            continue;
        }
        if kind == PiiKind::CreditCard {
            scan.luhn_valid_cards += re
                .find_iter(&scan.masked)
                .filter(|m| is_valid_credit_card(m.as_str()))
                .count();
        }
        scan.masked = re
            .replace_all(&scan.masked, |caps: &regex::Captures| mask_for(kind, &caps[0]))
            .into_owned();
        scan.kinds.push(kind);
    }

    scan
}
