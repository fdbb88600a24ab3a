//! Typing activity classification.
//!
//! Pure, host-agnostic heuristics shared by every editor integration:
//! - Run-on thought scoring from a line of text plus rolling buffer length
//! - Severity bucketing of scores
//! - Attention analysis with canned suggestions
//! - A small per-editor typing session that owns the rolling buffer
//!
//! Nothing here performs I/O or panics on user input.
//!
//! # Example
//!
//! ```
//! use quill_analysis::{analyze, TypingContext, DEFAULT_TRIGGER_KEYWORDS};
//!
//! let ctx = TypingContext::new("can you help me?", 16, 0);
//! let result = analyze(&ctx, DEFAULT_TRIGGER_KEYWORDS, 50);
//! assert!(result.needs_attention);
//! ```

mod analyzer;
mod responses;
mod score;
mod session;
pub mod text;

pub use analyzer::{
    analyze, analyze_with_buffer, ContextTag, TypingAnalysisResult, TypingContext,
    DEFAULT_TRIGGER_KEYWORDS,
};
pub use score::{classify_severity, score_run_on_thought, Severity, DEFAULT_RUN_ON_THRESHOLD};
pub use session::{TypingIntensity, TypingSession, DEFAULT_IDLE_RESET_MS, DEFAULT_TYPING_THRESHOLD};
