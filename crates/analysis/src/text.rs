//! String utilities used by the heuristics.

use regex::Regex;
use std::sync::OnceLock;

/// Connectives that signal clauses being chained together.
pub const CONJUNCTIONS: &[&str] = &[
    "and",
    "or",
    "but",
    "however",
    "therefore",
    "furthermore",
    "moreover",
    "additionally",
];

fn conjunction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternation = CONJUNCTIONS.join("|");
        Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("conjunction pattern is valid")
    })
}

/// Whitespace-tokenized words, empty tokens discarded.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

pub fn word_count(text: &str) -> usize {
    words(text).count()
}

/// Length in characters (Unicode scalar values), not bytes.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Number of clauses with non-whitespace content when splitting on `.`, `!`, `?`.
pub fn clause_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|clause| !clause.trim().is_empty())
        .count()
}

/// Case-insensitive whole-word matches of [`CONJUNCTIONS`].
pub fn conjunction_count(text: &str) -> usize {
    conjunction_re().find_iter(text).count()
}
