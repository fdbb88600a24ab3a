//! Attention analysis for a single typing snapshot.

use crate::responses;
use crate::score::{classify_severity, score_run_on_thought, Severity};
use crate::text;
use serde::{Deserialize, Serialize};

/// Keywords that raise assistance confidence when the user has not configured any.
pub const DEFAULT_TRIGGER_KEYWORDS: &[&str] = &["help", "assist", "guide", "suggest", "recommend"];

const LONG_TEXT_WORDS: usize = 20;
const LONG_TEXT_CHARS: usize = 100;

const RUN_ON_CONFIDENCE: f32 = 0.9;
const KEYWORD_CONFIDENCE: f32 = 0.8;
const QUESTION_CONFIDENCE: f32 = 0.7;
const LONG_TEXT_CONFIDENCE: f32 = 0.6;

/// Snapshot of the line being edited, taken on a keystroke.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingContext {
    pub text: String,
    /// Caret offset in characters, clamped to the text length.
    pub cursor_position: usize,
    pub timestamp_ms: i64,
    pub word_count: usize,
    pub character_count: usize,
    /// Characters typed since the last paragraph break.
    #[serde(default)]
    pub rolling_buffer_len: usize,
    /// Host label for the page or file being edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_context: Option<String>,
    /// Host label for the editor element or view type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_context: Option<String>,
}

impl TypingContext {
    pub fn new(text: impl Into<String>, cursor_position: usize, timestamp_ms: i64) -> Self {
        let text = text.into();
        let character_count = text::char_count(&text);
        Self {
            word_count: text::word_count(&text),
            character_count,
            cursor_position: cursor_position.min(character_count),
            timestamp_ms,
            text,
            rolling_buffer_len: 0,
            page_context: None,
            element_context: None,
        }
    }

    pub fn with_rolling_buffer(mut self, len: usize) -> Self {
        self.rolling_buffer_len = len;
        self
    }

    pub fn with_page_context(mut self, page: impl Into<String>) -> Self {
        self.page_context = Some(page.into());
        self
    }

    pub fn with_element_context(mut self, element: impl Into<String>) -> Self {
        self.element_context = Some(element.into());
        self
    }

    pub fn run_on_score(&self) -> u8 {
        score_run_on_thought(&self.text, self.rolling_buffer_len)
    }
}

/// Why a snapshot was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextTag {
    RunOnThought,
    KeywordTrigger,
    LongText,
    Question,
}

impl ContextTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextTag::RunOnThought => "run-on-thought",
            ContextTag::KeywordTrigger => "keyword-trigger",
            ContextTag::LongText => "long-text",
            ContextTag::Question => "question",
        }
    }
}

impl std::fmt::Display for ContextTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingAnalysisResult {
    pub needs_attention: bool,
    pub has_trigger_keywords: bool,
    pub is_run_on_thought: bool,
    pub run_on_score: u8,
    /// Only meaningful when `is_run_on_thought` is set.
    pub severity: Severity,
    pub confidence: f32,
    pub suggested_response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextTag>,
}

/// Analyze a snapshot against the user's keywords and run-on threshold.
///
/// Suggestion priority: run-on thought, trigger keyword, long text, question,
/// then a generic long-text fallback for anything else that needs attention
/// (for example a lone `!`).
pub fn analyze<S: AsRef<str>>(
    context: &TypingContext,
    trigger_keywords: &[S],
    run_on_threshold: u8,
) -> TypingAnalysisResult {
    let lowered = context.text.to_lowercase();

    let has_trigger_keywords = trigger_keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .any(|k| !k.is_empty() && lowered.contains(&k));

    let run_on_score = context.run_on_score();
    let is_run_on_thought = run_on_score > run_on_threshold;
    let severity = classify_severity(run_on_score);

    let is_long_text = context.word_count > LONG_TEXT_WORDS;
    let is_question = lowered.contains('?');

    let needs_attention = has_trigger_keywords
        || is_long_text
        || context.character_count > LONG_TEXT_CHARS
        || is_question
        || lowered.contains('!')
        || is_run_on_thought;

    let (tag, confidence, suggestion) = if is_run_on_thought {
        (
            Some(ContextTag::RunOnThought),
            RUN_ON_CONFIDENCE,
            responses::for_run_on(severity),
        )
    } else if has_trigger_keywords {
        (
            Some(ContextTag::KeywordTrigger),
            KEYWORD_CONFIDENCE,
            responses::for_keywords(&lowered),
        )
    } else if is_long_text {
        (
            Some(ContextTag::LongText),
            LONG_TEXT_CONFIDENCE,
            responses::LONG_TEXT,
        )
    } else if is_question {
        (
            Some(ContextTag::Question),
            QUESTION_CONFIDENCE,
            responses::QUESTION,
        )
    } else if needs_attention {
        // Punctuation or character-count triggers share the long-text tag.
        (
            Some(ContextTag::LongText),
            LONG_TEXT_CONFIDENCE,
            responses::GENERIC,
        )
    } else {
        (None, 0.0, "")
    };

    tracing::trace!(
        run_on_score,
        is_run_on_thought,
        has_trigger_keywords,
        needs_attention,
        tag = tag.map(|t| t.as_str()),
        "typing_analysis"
    );

    TypingAnalysisResult {
        needs_attention,
        has_trigger_keywords,
        is_run_on_thought,
        run_on_score,
        severity,
        confidence,
        suggested_response: suggestion.to_string(),
        context: tag,
    }
}

/// Convenience wrapper for hosts that track the rolling buffer separately.
pub fn analyze_with_buffer<S: AsRef<str>>(
    text: &str,
    rolling_buffer_len: usize,
    trigger_keywords: &[S],
    run_on_threshold: u8,
) -> TypingAnalysisResult {
    let cursor = text::char_count(text);
    let context = TypingContext::new(text, cursor, 0).with_rolling_buffer(rolling_buffer_len);
    analyze(&context, trigger_keywords, run_on_threshold)
}
