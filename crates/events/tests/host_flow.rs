//! End-to-end flow a host runs: typing session, analysis, events on a bus.

use quill_analysis::{ContextTag, TypingSession};
use quill_events::{
    emit_event, event_names, AssistSuggestionEvent, EventBus, FieldCapturedEvent,
    InMemoryEventBus,
};
use quill_privacy::{classify_field, FieldMetadata};

const KEYWORDS: [&str; 5] = ["help", "assist", "guide", "suggest", "recommend"];

const RUN_ON: &str = "I was thinking about the project and we need to consider the timeline \
and also the budget constraints but however we should also think about the team capacity \
and therefore we might need to hire more people.";

#[test]
fn run_on_typing_emits_one_suggestion() {
    let bus = InMemoryEventBus::new();
    let mut session = TypingSession::default();

    let mut now = 1_000;
    for ch in RUN_ON.chars() {
        session.record_keystroke(ch, now);
        now += 20;
    }

    let result = session.analyze_snapshot(RUN_ON, RUN_ON.chars().count(), now, &KEYWORDS, 50);
    if let Some(event) = AssistSuggestionEvent::from_analysis(&result, now) {
        emit_event(&bus, event_names::ASSIST_SUGGESTION, &event.with_intensity(session.intensity()));
    }

    let events = bus.events_for(event_names::ASSIST_SUGGESTION);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].payload["context"], ContextTag::RunOnThought.as_str());
    assert_eq!(events[0].payload["intensity"], "high");
}

#[test]
fn captured_fields_reach_the_bus_masked() {
    let bus = InMemoryEventBus::new();
    let fields = [
        (FieldMetadata::with_type("password"), "correct horse"),
        (FieldMetadata::with_name("ssn"), "123-45-6789"),
        (FieldMetadata::with_name("comment"), "see you at 5"),
    ];

    for (meta, value) in &fields {
        let c = classify_field(meta, value, true);
        let event = FieldCapturedEvent::new(meta.name.clone(), &c, 0);
        emit_event(&bus, event_names::FIELD_CAPTURED, &event);
    }

    let values: Vec<String> = bus
        .events()
        .iter()
        .map(|e| e.payload["value"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(values, vec!["********", "***-**-6789", "see you at 5"]);

    bus.emit("test:other", serde_json::json!({}));
    assert_eq!(bus.events_for(event_names::FIELD_CAPTURED).len(), 3);
}
