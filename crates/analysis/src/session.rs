//! Per-editor typing session.
//!
//! Owns the rolling buffer length and keystroke count that the scoring
//! heuristics read. Hosts feed it keystrokes with their own timestamps;
//! no timers live here.

use crate::analyzer::{analyze, TypingAnalysisResult, TypingContext};
use serde::{Deserialize, Serialize};

/// Keystrokes without a pause before activity counts as high.
pub const DEFAULT_TYPING_THRESHOLD: u32 = 100;

/// Inactivity after which the keystroke count resets.
pub const DEFAULT_IDLE_RESET_MS: i64 = 2_000;

/// Coarse typing activity level for host indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypingIntensity {
    Idle,
    Active,
    High,
}

impl TypingIntensity {
    pub fn from_count(keystrokes: u32, threshold: u32) -> Self {
        if keystrokes == 0 {
            TypingIntensity::Idle
        } else if keystrokes < threshold {
            TypingIntensity::Active
        } else {
            TypingIntensity::High
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypingSession {
    buffer_len: usize,
    keystrokes: u32,
    last_keystroke_ms: Option<i64>,
    idle_reset_ms: i64,
    typing_threshold: u32,
}

impl Default for TypingSession {
    fn default() -> Self {
        Self::new(DEFAULT_TYPING_THRESHOLD, DEFAULT_IDLE_RESET_MS)
    }
}

impl TypingSession {
    pub fn new(typing_threshold: u32, idle_reset_ms: i64) -> Self {
        Self {
            buffer_len: 0,
            keystrokes: 0,
            last_keystroke_ms: None,
            idle_reset_ms,
            typing_threshold,
        }
    }

    /// Characters typed since the last paragraph break or reset.
    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    pub fn keystrokes(&self) -> u32 {
        self.keystrokes
    }

    pub fn intensity(&self) -> TypingIntensity {
        TypingIntensity::from_count(self.keystrokes, self.typing_threshold)
    }

    /// Whether no keystroke arrived within the idle window before `now_ms`.
    pub fn is_idle(&self, now_ms: i64) -> bool {
        match self.last_keystroke_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.idle_reset_ms,
            None => true,
        }
    }

    /// Record one typed character. A newline counts as a paragraph break.
    pub fn record_keystroke(&mut self, ch: char, now_ms: i64) {
        if self.last_keystroke_ms.is_some() && self.is_idle(now_ms) {
            tracing::debug!(keystrokes = self.keystrokes, "typing idle, resetting count");
            self.keystrokes = 0;
        }
        self.last_keystroke_ms = Some(now_ms);
        self.keystrokes = self.keystrokes.saturating_add(1);

        if ch == '\n' {
            self.paragraph_break();
        } else {
            self.buffer_len = self.buffer_len.saturating_add(1);
        }
    }

    /// Record a chunk of text (paste or line replay) one character at a time.
    pub fn record_text(&mut self, text: &str, now_ms: i64) {
        for ch in text.chars() {
            self.record_keystroke(ch, now_ms);
        }
    }

    pub fn paragraph_break(&mut self) {
        self.buffer_len = 0;
    }

    /// Field blur or tab switch: drop everything.
    pub fn reset(&mut self) {
        self.buffer_len = 0;
        self.keystrokes = 0;
        self.last_keystroke_ms = None;
    }

    /// Build a context for the current line, carrying the rolling buffer.
    pub fn snapshot(&self, text: &str, cursor_position: usize, now_ms: i64) -> TypingContext {
        TypingContext::new(text, cursor_position, now_ms).with_rolling_buffer(self.buffer_len)
    }

    pub fn analyze_snapshot<S: AsRef<str>>(
        &self,
        text: &str,
        cursor_position: usize,
        now_ms: i64,
        trigger_keywords: &[S],
        run_on_threshold: u8,
    ) -> TypingAnalysisResult {
        let context = self.snapshot(text, cursor_position, now_ms);
        analyze(&context, trigger_keywords, run_on_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_TRIGGER_KEYWORDS;

    #[test]
    fn test_buffer_accumulates_and_breaks_on_newline() {
        let mut session = TypingSession::default();
        session.record_text("hello", 0);
        assert_eq!(session.buffer_len(), 5);
        session.record_keystroke('\n', 10);
        assert_eq!(session.buffer_len(), 0);
        assert_eq!(session.keystrokes(), 6);
    }

    #[test]
    fn test_idle_resets_keystroke_count_but_not_buffer() {
        let mut session = TypingSession::new(100, 2_000);
        session.record_text("abc", 0);
        assert!(!session.is_idle(1_999));
        assert!(session.is_idle(2_000));

        session.record_keystroke('d', 5_000);
        assert_eq!(session.keystrokes(), 1);
        assert_eq!(session.buffer_len(), 4);
    }

    #[test]
    fn test_fresh_session_is_idle() {
        let session = TypingSession::default();
        assert!(session.is_idle(0));
        assert_eq!(session.intensity(), TypingIntensity::Idle);
    }

    #[test]
    fn test_intensity_levels() {
        assert_eq!(TypingIntensity::from_count(0, 10), TypingIntensity::Idle);
        assert_eq!(TypingIntensity::from_count(9, 10), TypingIntensity::Active);
        assert_eq!(TypingIntensity::from_count(10, 10), TypingIntensity::High);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = TypingSession::default();
        session.record_text("some text", 0);
        session.reset();
        assert_eq!(session.buffer_len(), 0);
        assert_eq!(session.keystrokes(), 0);
        assert!(session.is_idle(0));
    }

    #[test]
    fn test_long_buffer_tips_analysis_into_run_on() {
        let mut session = TypingSession::default();
        session.record_text(&"a".repeat(250), 0);
        let line = "x and y or z but w";
        // 15 for conjunctions + 20 for the buffer
        let result = session.analyze_snapshot(line, line.len(), 0, DEFAULT_TRIGGER_KEYWORDS, 30);
        assert_eq!(result.run_on_score, 35);
        assert!(result.is_run_on_thought);
    }
}
