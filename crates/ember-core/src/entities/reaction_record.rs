//! Reaction record - one swipe outcome per ordered (actor, target) pair

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::UserId;

/// Outcome of a swipe on a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Like,
    Dislike,
    Superlike,
    /// Written by the resolver once a mutual like is detected; never
    /// recorded directly by a swipe.
    Matched,
}

impl Reaction {
    /// Stable string code used in persistence
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Superlike => "superlike",
            Self::Matched => "matched",
        }
    }

    /// Parse a persisted code
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        match code {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            "superlike" => Ok(Self::Superlike),
            "matched" => Ok(Self::Matched),
            other => Err(DomainError::UnknownReaction(other.to_string())),
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reaction record entity
///
/// At most one live record exists per ordered (user, target) pair;
/// re-recording the pair updates `reaction` and `created_at` in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub target_id: UserId,
    pub reaction: Reaction,
    pub is_match: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ReactionRecord {
    /// Create a fresh (unmatched) record for a swipe
    pub fn new(user_id: UserId, target_id: UserId, reaction: Reaction) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            target_id,
            reaction,
            is_match: false,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Whether the record is live (not soft-deleted)
    #[inline]
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Flip this record into the matched state
    pub fn mark_matched(&mut self) {
        self.reaction = Reaction::Matched;
        self.is_match = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_codes_roundtrip() {
        for r in [
            Reaction::Like,
            Reaction::Dislike,
            Reaction::Superlike,
            Reaction::Matched,
        ] {
            assert_eq!(Reaction::parse(r.as_str()).unwrap(), r);
        }
    }

    #[test]
    fn test_unknown_reaction_rejected() {
        assert!(Reaction::parse("wink").is_err());
    }

    #[test]
    fn test_new_record_is_live_and_unmatched() {
        let record = ReactionRecord::new(UserId::generate(), UserId::generate(), Reaction::Like);
        assert!(record.is_live());
        assert!(!record.is_match);
        assert_eq!(record.reaction, Reaction::Like);
    }

    #[test]
    fn test_mark_matched() {
        let mut record =
            ReactionRecord::new(UserId::generate(), UserId::generate(), Reaction::Like);
        record.mark_matched();
        assert!(record.is_match);
        assert_eq!(record.reaction, Reaction::Matched);
    }
}
