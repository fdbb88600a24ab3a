//! JSON output helpers.

use quill_events::EventBus;
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Event bus that writes each event as one JSON line.
pub struct JsonLinesBus<W> {
    out: Mutex<W>,
}

impl<W: Write> JsonLinesBus<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> EventBus for JsonLinesBus<W> {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        let line = serde_json::json!({ "topic": topic, "payload": payload });
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            tracing::warn!(topic, error = %e, "failed to write event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_lines_bus_writes_one_line_per_event() {
        let bus = JsonLinesBus::new(Vec::new());
        bus.emit("a:b", json!({"n": 1}));
        bus.emit("c:d", json!([]));

        let text = String::from_utf8(bus.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, json!({"topic": "a:b", "payload": {"n": 1}}));
    }

    #[test]
    fn test_to_json_pretty() {
        assert_eq!(to_json(&json!({"a": 1}), false).unwrap(), r#"{"a":1}"#);
        assert!(to_json(&json!({"a": 1}), true).unwrap().contains('\n'));
    }
}
