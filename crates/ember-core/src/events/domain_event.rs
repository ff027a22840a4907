//! Domain events - events emitted when domain state changes
//!
//! These events are handed to the (out-of-scope) notification collaborator;
//! this crate only defines their shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{EngagementKind, Reaction};
use crate::value_objects::{Target, UserId};

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    ReactionRecorded(ReactionRecordedEvent),
    MatchCreated(MatchCreatedEvent),
    EngagementToggled(EngagementToggledEvent),
}

/// A swipe was recorded (or re-recorded) for a pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionRecordedEvent {
    pub actor_id: UserId,
    pub target_id: UserId,
    pub reaction: Reaction,
    pub recorded_at: DateTime<Utc>,
}

/// Two users entered the mutually-matched state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCreatedEvent {
    pub user_id: UserId,
    pub counterpart_id: UserId,
    pub matched_at: DateTime<Utc>,
}

/// An engagement was toggled on or off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementToggledEvent {
    pub engager_id: UserId,
    pub recipient_id: UserId,
    pub target: Target,
    pub kind: EngagementKind,
    pub engaged: bool,
    pub toggled_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_tag() {
        let event = DomainEvent::MatchCreated(MatchCreatedEvent {
            user_id: UserId::generate(),
            counterpart_id: UserId::generate(),
            matched_at: Utc::now(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "MATCH_CREATED");
    }

    #[test]
    fn test_toggle_event_roundtrip() {
        let event = DomainEvent::EngagementToggled(EngagementToggledEvent {
            engager_id: UserId::generate(),
            recipient_id: UserId::generate(),
            target: Target::User(UserId::generate()),
            kind: EngagementKind::Follower,
            engaged: true,
            toggled_at: Utc::now(),
        });
        let json = serde_json::to_string(&event).unwrap();
        let back: DomainEvent = serde_json::from_str(&json).unwrap();
        match back {
            DomainEvent::EngagementToggled(e) => assert!(e.engaged),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
