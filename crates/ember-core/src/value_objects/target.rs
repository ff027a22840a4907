//! Engagement target - the entity an engagement points at
//!
//! A closed tagged union instead of an (id, type-string) pair: callers name
//! the target through a variant, and persistence round-trips through stable
//! string codes.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::UserId;
use crate::error::DomainError;

/// Discriminator for the kinds of entities that can accumulate engagements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    User,
    Post,
}

impl TargetKind {
    /// Stable string code used in persistence
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Post => "post",
        }
    }

    /// Parse a persisted code
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        match code {
            "user" => Ok(Self::User),
            "post" => Ok(Self::Post),
            other => Err(DomainError::UnknownTargetKind(other.to_string())),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed reference to the entity receiving engagements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Target {
    User(UserId),
    Post(Uuid),
}

impl Target {
    /// The discriminator for this target
    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        match self {
            Self::User(_) => TargetKind::User,
            Self::Post(_) => TargetKind::Post,
        }
    }

    /// The raw id of the referenced entity
    #[must_use]
    pub const fn id(&self) -> Uuid {
        match self {
            Self::User(id) => id.into_inner(),
            Self::Post(id) => *id,
        }
    }

    /// Reassemble a target from its persisted (kind, id) pair
    pub fn from_parts(kind: TargetKind, id: Uuid) -> Self {
        match kind {
            TargetKind::User => Self::User(UserId::from_uuid(id)),
            TargetKind::Post => Self::Post(id),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_roundtrip() {
        for kind in [TargetKind::User, TargetKind::Post] {
            assert_eq!(TargetKind::parse(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(matches!(
            TargetKind::parse("emoji"),
            Err(DomainError::UnknownTargetKind(_))
        ));
    }

    #[test]
    fn test_target_parts_roundtrip() {
        let target = Target::User(UserId::generate());
        let rebuilt = Target::from_parts(target.kind(), target.id());
        assert_eq!(target, rebuilt);
    }
}
