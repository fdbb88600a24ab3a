//! Canned suggestion text shown by host overlays.

use crate::score::Severity;

pub const RUN_ON_HIGH: &str = "This looks like a run-on thought. Consider breaking it into smaller, focused paragraphs for better readability.";
pub const RUN_ON_MEDIUM: &str = "This passage could benefit from some structure. Try adding breaks or organizing into bullet points.";
pub const RUN_ON_LOW: &str = "Consider adding a paragraph break here to improve readability.";

pub const LONG_TEXT: &str = "Consider breaking this into smaller, focused sections.";
pub const QUESTION: &str = "This looks like a question. Would you like me to help you find an answer?";
pub const GENERIC: &str = "This text might benefit from some structure and breaks.";

pub const KEYWORD_FALLBACK: &str = "I noticed you might need some help. How can I assist you?";

/// Keyword replies, checked in order; the first keyword found wins.
const KEYWORD_REPLIES: &[(&str, &str)] = &[
    (
        "help",
        "I can help you with that! What specific assistance do you need?",
    ),
    (
        "assist",
        "I'm here to assist you. Let me know what you'd like to work on.",
    ),
    (
        "guide",
        "I can guide you through this process. What would you like to accomplish?",
    ),
    (
        "suggest",
        "I have some suggestions for you. Would you like to hear them?",
    ),
    (
        "recommend",
        "I can recommend some approaches. What are you trying to achieve?",
    ),
];

pub fn for_run_on(severity: Severity) -> &'static str {
    match severity {
        Severity::High => RUN_ON_HIGH,
        Severity::Medium => RUN_ON_MEDIUM,
        Severity::Low => RUN_ON_LOW,
    }
}

/// `lowered` must already be lower-cased.
pub fn for_keywords(lowered: &str) -> &'static str {
    KEYWORD_REPLIES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, reply)| *reply)
        .unwrap_or(KEYWORD_FALLBACK)
}
