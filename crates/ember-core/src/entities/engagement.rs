//! Engagement entities - typed interaction counting on arbitrary targets
//!
//! An aggregate is the per-target rollup; details are the per-action rows it
//! is derived from. Counts live in one counter row per (aggregate, kind) and
//! are adjusted with atomic in-place arithmetic, so the aggregate never goes
//! through a decode/mutate/encode cycle.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{AggregateId, DetailId, Target, UserId};

/// The closed set of engagement kinds the system counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementKind {
    Follower,
    Following,
    Like,
    Favorite,
    Bookmark,
    Gift,
}

impl EngagementKind {
    /// All kinds, in display order
    pub const ALL: [Self; 6] = [
        Self::Follower,
        Self::Following,
        Self::Like,
        Self::Favorite,
        Self::Bookmark,
        Self::Gift,
    ];

    /// Stable string code used in persistence
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Follower => "follower",
            Self::Following => "following",
            Self::Like => "like",
            Self::Favorite => "favorite",
            Self::Bookmark => "bookmark",
            Self::Gift => "gift",
        }
    }

    /// Parse a persisted code
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        match code {
            "follower" => Ok(Self::Follower),
            "following" => Ok(Self::Following),
            "like" => Ok(Self::Like),
            "favorite" => Ok(Self::Favorite),
            "bookmark" => Ok(Self::Bookmark),
            "gift" => Ok(Self::Gift),
            other => Err(DomainError::UnknownEngagementKind(other.to_string())),
        }
    }

    /// Whether details of this kind carry a monetary amount
    #[must_use]
    pub const fn is_monetary(self) -> bool {
        matches!(self, Self::Gift)
    }
}

impl fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete engagement action with its typed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngagementAction {
    Follower,
    Following,
    Like,
    Favorite,
    Bookmark,
    Gift { amount: Decimal },
}

impl EngagementAction {
    /// The counter kind this action adjusts
    #[must_use]
    pub const fn kind(&self) -> EngagementKind {
        match self {
            Self::Follower => EngagementKind::Follower,
            Self::Following => EngagementKind::Following,
            Self::Like => EngagementKind::Like,
            Self::Favorite => EngagementKind::Favorite,
            Self::Bookmark => EngagementKind::Bookmark,
            Self::Gift { .. } => EngagementKind::Gift,
        }
    }

    /// Monetary amount carried by the action, if any
    #[must_use]
    pub const fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Gift { amount } => Some(*amount),
            _ => None,
        }
    }

    /// Reassemble an action from its persisted (kind, amount) pair
    pub fn from_parts(kind: EngagementKind, amount: Option<Decimal>) -> Self {
        match kind {
            EngagementKind::Follower => Self::Follower,
            EngagementKind::Following => Self::Following,
            EngagementKind::Like => Self::Like,
            EngagementKind::Favorite => Self::Favorite,
            EngagementKind::Bookmark => Self::Bookmark,
            EngagementKind::Gift => Self::Gift {
                amount: amount.unwrap_or(Decimal::ZERO),
            },
        }
    }
}

/// Engagement aggregate entity - one per (target id, target kind)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementAggregate {
    pub id: AggregateId,
    pub target: Target,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EngagementAggregate {
    /// Create a fresh aggregate for a target
    pub fn new(target: Target) -> Self {
        let now = Utc::now();
        Self {
            id: AggregateId::generate(),
            target,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One counter: live detail count (and accrued amount) for a kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCount {
    pub kind: EngagementKind,
    pub count: i64,
    pub amount: Decimal,
}

impl KindCount {
    /// A zeroed counter for a kind
    #[must_use]
    pub fn zero(kind: EngagementKind) -> Self {
        Self {
            kind,
            count: 0,
            amount: Decimal::ZERO,
        }
    }
}

/// Read model for an aggregate together with its counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementSummary {
    pub aggregate: EngagementAggregate,
    pub counts: Vec<KindCount>,
}

impl EngagementSummary {
    /// Counter value for a kind, zero when the kind has never been engaged
    pub fn count(&self, kind: EngagementKind) -> i64 {
        self.counts
            .iter()
            .find(|c| c.kind == kind)
            .map_or(0, |c| c.count)
    }

    /// Accrued amount for a kind
    pub fn amount(&self, kind: EngagementKind) -> Decimal {
        self.counts
            .iter()
            .find(|c| c.kind == kind)
            .map_or(Decimal::ZERO, |c| c.amount)
    }
}

/// Engagement detail entity - one row per concrete engagement action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementDetail {
    pub id: DetailId,
    pub aggregate_id: AggregateId,
    pub engager_id: UserId,
    pub recipient_id: UserId,
    pub action: EngagementAction,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl EngagementDetail {
    /// Create a fresh detail row
    pub fn new(
        aggregate_id: AggregateId,
        engager_id: UserId,
        recipient_id: UserId,
        action: EngagementAction,
    ) -> Self {
        Self {
            id: DetailId::generate(),
            aggregate_id,
            engager_id,
            recipient_id,
            action,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Whether the detail is live (not toggled off)
    #[inline]
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// The counter kind this detail contributes to
    #[inline]
    pub fn kind(&self) -> EngagementKind {
        self.action.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::TargetKind;

    #[test]
    fn test_kind_codes_roundtrip() {
        for kind in EngagementKind::ALL {
            assert_eq!(EngagementKind::parse(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(matches!(
            EngagementKind::parse("applause"),
            Err(DomainError::UnknownEngagementKind(_))
        ));
    }

    #[test]
    fn test_only_gift_is_monetary() {
        assert!(EngagementKind::Gift.is_monetary());
        for kind in EngagementKind::ALL {
            if kind != EngagementKind::Gift {
                assert!(!kind.is_monetary());
            }
        }
    }

    #[test]
    fn test_action_kind_and_amount() {
        let gift = EngagementAction::Gift {
            amount: Decimal::new(1250, 2),
        };
        assert_eq!(gift.kind(), EngagementKind::Gift);
        assert_eq!(gift.amount(), Some(Decimal::new(1250, 2)));

        assert_eq!(EngagementAction::Follower.kind(), EngagementKind::Follower);
        assert_eq!(EngagementAction::Like.amount(), None);
    }

    #[test]
    fn test_action_parts_roundtrip() {
        let action = EngagementAction::Gift {
            amount: Decimal::new(500, 2),
        };
        let rebuilt = EngagementAction::from_parts(action.kind(), action.amount());
        assert_eq!(action, rebuilt);

        let plain = EngagementAction::Bookmark;
        assert_eq!(
            EngagementAction::from_parts(plain.kind(), plain.amount()),
            plain
        );
    }

    #[test]
    fn test_new_aggregate_targets() {
        let aggregate = EngagementAggregate::new(Target::User(UserId::generate()));
        assert_eq!(aggregate.target.kind(), TargetKind::User);
    }

    #[test]
    fn test_summary_lookup_defaults_to_zero() {
        let summary = EngagementSummary {
            aggregate: EngagementAggregate::new(Target::User(UserId::generate())),
            counts: vec![KindCount {
                kind: EngagementKind::Follower,
                count: 3,
                amount: Decimal::ZERO,
            }],
        };
        assert_eq!(summary.count(EngagementKind::Follower), 3);
        assert_eq!(summary.count(EngagementKind::Gift), 0);
        assert_eq!(summary.amount(EngagementKind::Gift), Decimal::ZERO);
    }

    #[test]
    fn test_detail_is_live() {
        let detail = EngagementDetail::new(
            AggregateId::generate(),
            UserId::generate(),
            UserId::generate(),
            EngagementAction::Favorite,
        );
        assert!(detail.is_live());
        assert_eq!(detail.kind(), EngagementKind::Favorite);
    }
}
