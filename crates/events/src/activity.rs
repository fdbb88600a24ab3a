//! Activity model for the assistance feed.
//!
//! Hosts render this list; the serialized shape is the contract.

use crate::bus::{emit_event, EventBus};
use crate::{event_names, AssistSuggestionEvent, FieldCapturedEvent, PairingValidatedEvent};
use serde::{Deserialize, Serialize};

/// Type of activity in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// A suggestion was offered.
    Suggestion,
    /// A pairing code was checked.
    Pairing,
    /// A form value was captured.
    FieldCapture,
    /// Preferences changed.
    SettingsChange,
}

/// Status of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Completed,
    Error,
}

/// Type-specific content for an activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityContent {
    /// Suggestion text or masked field value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Context tag, pairing format or sensitivity level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Changed setting keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

/// Feed item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique identifier (UUID).
    pub id: String,

    #[serde(rename = "type")]
    pub activity_type: ActivityType,

    /// Timestamp in milliseconds since epoch.
    pub timestamp: i64,

    pub status: ActivityStatus,

    pub content: ActivityContent,
}

impl Activity {
    /// Create a new activity with generated ID.
    pub fn new(activity_type: ActivityType, status: ActivityStatus) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            activity_type,
            timestamp: chrono::Utc::now().timestamp_millis(),
            status,
            content: ActivityContent::default(),
        }
    }

    pub fn suggestion(event: &AssistSuggestionEvent) -> Self {
        let mut activity = Self::new(ActivityType::Suggestion, ActivityStatus::Completed);
        activity.content.text = Some(event.message.clone());
        activity.content.label = Some(event.context.to_string());
        activity.content.score = Some(event.run_on_score);
        activity
    }

    pub fn pairing(event: &PairingValidatedEvent) -> Self {
        let status = if event.valid {
            ActivityStatus::Completed
        } else {
            ActivityStatus::Error
        };
        let mut activity = Self::new(ActivityType::Pairing, status);
        activity.content.label = Some(event.format.to_string());
        activity.content.error = event.error.clone();
        activity
    }

    pub fn field_capture(event: &FieldCapturedEvent) -> Self {
        let mut activity = Self::new(ActivityType::FieldCapture, ActivityStatus::Completed);
        activity.content.text = Some(event.value.clone());
        activity.content.label = Some(event.category.to_string());
        activity
    }

    pub fn settings_change(keys: Vec<String>) -> Self {
        let mut activity = Self::new(ActivityType::SettingsChange, ActivityStatus::Completed);
        activity.content.keys = Some(keys);
        activity
    }

    /// Post this entry to the feed topic.
    pub fn publish(&self, bus: &dyn EventBus) {
        emit_event(bus, event_names::ACTIVITY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_pairing::validate_pairing_code;

    #[test]
    fn test_activity_serialization() {
        let activity = Activity::settings_change(vec!["excludePii".into()]);
        let json = serde_json::to_string(&activity).unwrap();
        assert!(json.contains("\"type\":\"settings_change\""));
        assert!(json.contains("\"keys\":[\"excludePii\"]"));
        assert!(json.contains("\"status\":\"completed\""));
    }

    #[test]
    fn test_suggestion_carries_tag_and_score() {
        let event = AssistSuggestionEvent {
            context: quill_analysis::ContextTag::Question,
            message: "Need help?".into(),
            confidence: 0.7,
            run_on_score: 12,
            severity: None,
            intensity: None,
            timestamp_ms: 0,
        };
        let activity = Activity::suggestion(&event);
        assert_eq!(activity.activity_type, ActivityType::Suggestion);
        assert_eq!(activity.content.label.as_deref(), Some("question"));
        assert_eq!(activity.content.score, Some(12));
        assert!(uuid::Uuid::parse_str(&activity.id).is_ok());
    }

    #[test]
    fn test_publish_uses_feed_topic() {
        let bus = crate::InMemoryEventBus::new();
        let activity = Activity::settings_change(vec!["backendUrl".into()]);
        activity.publish(&bus);

        let feed = bus.events_for(event_names::ACTIVITY);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].payload["id"], activity.id.as_str());
        assert_eq!(feed[0].payload["type"], "settings_change");
    }

    #[test]
    fn test_invalid_pairing_is_error() {
        let event = PairingValidatedEvent::new(&validate_pairing_code("not-a-code"), 0);
        let activity = Activity::pairing(&event);
        assert_eq!(activity.status, ActivityStatus::Error);
        assert_eq!(activity.content.label.as_deref(), Some("unknown"));
        assert_eq!(
            activity.content.error.as_deref(),
            Some("Unrecognized code format")
        );
    }
}
