//! Run-on thought scoring.
//!
//! Each rule contributes a fixed weight independently of the others; the sum
//! is clamped to 100.

use crate::text;
use serde::{Deserialize, Serialize};

/// Default score above which a line counts as a run-on thought.
pub const DEFAULT_RUN_ON_THRESHOLD: u8 = 50;

const MAX_SCORE: u32 = 100;

const LONG_SENTENCE_WORDS: usize = 20;
const LONG_SENTENCE_WEIGHT: u32 = 30;

const LONG_LINE_CHARS: usize = 100;
const LONG_LINE_WEIGHT: u32 = 25;

const MANY_CLAUSES: usize = 3;
const MANY_CLAUSES_WEIGHT: u32 = 20;

const MANY_CONJUNCTIONS: usize = 2;
const MANY_CONJUNCTIONS_WEIGHT: u32 = 15;

/// Characters typed without a paragraph break.
const CONTINUOUS_BUFFER_CHARS: usize = 200;
const CONTINUOUS_BUFFER_WEIGHT: u32 = 20;

const HIGH_SEVERITY_ABOVE: u8 = 70;
const MEDIUM_SEVERITY_ABOVE: u8 = 40;

/// How strongly a run-on thought should be flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score `line` for run-on characteristics.
///
/// `rolling_buffer_len` is the number of characters typed since the last
/// paragraph break, field blur or tab switch; the caller owns that counter.
pub fn score_run_on_thought(line: &str, rolling_buffer_len: usize) -> u8 {
    let mut score = 0u32;

    if text::word_count(line) > LONG_SENTENCE_WORDS {
        score += LONG_SENTENCE_WEIGHT;
    }
    if text::char_count(line) > LONG_LINE_CHARS {
        score += LONG_LINE_WEIGHT;
    }
    if text::clause_count(line) > MANY_CLAUSES {
        score += MANY_CLAUSES_WEIGHT;
    }
    if text::conjunction_count(line) > MANY_CONJUNCTIONS {
        score += MANY_CONJUNCTIONS_WEIGHT;
    }
    if rolling_buffer_len > CONTINUOUS_BUFFER_CHARS {
        score += CONTINUOUS_BUFFER_WEIGHT;
    }

    score.min(MAX_SCORE) as u8
}

/// Bucket a score: `> 70` high, `41..=70` medium, otherwise low.
pub fn classify_severity(score: u8) -> Severity {
    if score > HIGH_SEVERITY_ABOVE {
        Severity::High
    } else if score > MEDIUM_SEVERITY_ABOVE {
        Severity::Medium
    } else {
        Severity::Low
    }
}
