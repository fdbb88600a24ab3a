//! Replay typed text through a typing session.
//!
//! Each input line is typed into the current paragraph; a blank line ends
//! the paragraph. Suggestions, intensity changes and (optionally) every
//! analysis result go to the event bus.

use crate::commands::effective_threshold;
use quill_analysis::{TypingIntensity, TypingSession};
use quill_events::{emit_event, event_names, Activity, AssistSuggestionEvent, EventBus};
use quill_settings::Settings;
use serde::Serialize;
use std::io::BufRead;

#[derive(Debug, Serialize)]
struct IntensityChanged {
    intensity: TypingIntensity,
}

pub struct Watcher<'a> {
    session: TypingSession,
    keywords: Vec<&'a str>,
    threshold: u8,
    bus: &'a dyn EventBus,
    emit_all: bool,
    intensity: TypingIntensity,
    suggestions: usize,
}

impl<'a> Watcher<'a> {
    pub fn new(settings: &'a Settings, bus: &'a dyn EventBus, emit_all: bool) -> Self {
        let idle_reset_ms = i64::try_from(settings.typing_idle_reset_ms).unwrap_or(i64::MAX);
        Self {
            session: TypingSession::new(settings.typing_threshold, idle_reset_ms),
            keywords: settings.trigger_keywords(),
            threshold: effective_threshold(settings, None),
            bus,
            emit_all,
            intensity: TypingIntensity::Idle,
            suggestions: 0,
        }
    }

    pub fn suggestions(&self) -> usize {
        self.suggestions
    }

    pub fn process_line(&mut self, line: &str, now_ms: i64) {
        if line.trim().is_empty() {
            tracing::debug!(buffer = self.session.buffer_len(), "paragraph break");
            self.session.paragraph_break();
            return;
        }

        self.session.record_text(line, now_ms);
        let intensity = self.session.intensity();
        if intensity != self.intensity {
            self.intensity = intensity;
            emit_event(
                self.bus,
                event_names::TYPING_INTENSITY,
                &IntensityChanged { intensity },
            );
        }

        let cursor = line.chars().count();
        let result = self.session.analyze_snapshot(
            line,
            cursor,
            now_ms,
            &self.keywords[..],
            self.threshold,
        );
        if self.emit_all {
            emit_event(self.bus, event_names::TYPING_ANALYSIS, &result);
        }
        if let Some(event) = AssistSuggestionEvent::from_analysis(&result, now_ms) {
            self.suggestions += 1;
            let event = event.with_intensity(intensity);
            emit_event(self.bus, event_names::ASSIST_SUGGESTION, &event);
            Activity::suggestion(&event).publish(self.bus);
        }
    }

    /// Process every line of `input`, stamping each with the wall clock.
    pub fn run<R: BufRead>(&mut self, input: R) -> std::io::Result<usize> {
        let mut lines = 0;
        for line in input.lines() {
            self.process_line(&line?, chrono::Utc::now().timestamp_millis());
            lines += 1;
        }
        tracing::debug!(lines, suggestions = self.suggestions, "watch finished");
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_events::InMemoryEventBus;

    #[test]
    fn test_quiet_line_emits_only_intensity() {
        let settings = Settings::default();
        let bus = InMemoryEventBus::new();
        let mut watcher = Watcher::new(&settings, &bus, false);

        watcher.process_line("hello", 0);
        assert_eq!(watcher.suggestions(), 0);
        let events = bus.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].topic, event_names::TYPING_INTENSITY);
        assert_eq!(events[0].payload["intensity"], "active");
    }

    #[test]
    fn test_buffer_carries_across_lines_until_blank() {
        let settings = Settings::default();
        let bus = InMemoryEventBus::new();
        let mut watcher = Watcher::new(&settings, &bus, true);

        // 3 x 80 chars builds a 240-char paragraph buffer
        let line = "x".repeat(80);
        for i in 0..3 {
            watcher.process_line(&line, i * 10);
        }
        let analyses = bus.events_for(event_names::TYPING_ANALYSIS);
        assert_eq!(analyses[0].payload["runOnScore"], 0);
        assert_eq!(analyses[2].payload["runOnScore"], 20);

        watcher.process_line("", 40);
        watcher.process_line(&line, 50);
        let analyses = bus.events_for(event_names::TYPING_ANALYSIS);
        assert_eq!(analyses[3].payload["runOnScore"], 0);
    }

    #[test]
    fn test_question_emits_suggestion() {
        let settings = Settings::default();
        let bus = InMemoryEventBus::new();
        let mut watcher = Watcher::new(&settings, &bus, false);

        let input = std::io::Cursor::new("is this right?\n\nfine\n");
        let lines = watcher.run(input).unwrap();
        assert_eq!(lines, 3);
        assert_eq!(watcher.suggestions(), 1);

        let suggestions = bus.events_for(event_names::ASSIST_SUGGESTION);
        assert_eq!(suggestions[0].payload["context"], "question");
        let feed = bus.events_for(event_names::ACTIVITY);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].payload["type"], "suggestion");
    }
}
