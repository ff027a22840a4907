//! Reaction record entity <-> model mapper

use ember_core::entities::{Candidate, Reaction, ReactionRecord};
use ember_core::error::DomainError;
use ember_core::traits::SeenEntry;
use ember_core::value_objects::{GeoPoint, PublicId, UserId};

use crate::models::{ReactionRecordModel, SeenEntryModel};

/// Convert ReactionRecordModel to ReactionRecord entity
///
/// Fallible: the persisted reaction code must be a known variant.
impl TryFrom<ReactionRecordModel> for ReactionRecord {
    type Error = DomainError;

    fn try_from(model: ReactionRecordModel) -> Result<Self, Self::Error> {
        Ok(ReactionRecord {
            id: model.id,
            user_id: UserId::from_uuid(model.user_id),
            target_id: UserId::from_uuid(model.target_id),
            reaction: Reaction::parse(&model.reaction)?,
            is_match: model.is_match,
            created_at: model.created_at,
            deleted_at: model.deleted_at,
        })
    }
}

/// Convert a counterpart-page row into a SeenEntry
impl From<SeenEntryModel> for SeenEntry {
    fn from(model: SeenEntryModel) -> Self {
        let location = match (model.latitude, model.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new_unchecked(lat, lng)),
            _ => None,
        };
        SeenEntry {
            user: Candidate::new(
                UserId::from_uuid(model.id),
                PublicId::new(model.public_id),
                location,
            ),
            seen_at: model.seen_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_record_model_roundtrip() {
        let model = ReactionRecordModel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            target_id: Uuid::new_v4(),
            reaction: "superlike".to_string(),
            is_match: false,
            created_at: Utc::now(),
            deleted_at: None,
        };
        let record = ReactionRecord::try_from(model).unwrap();
        assert_eq!(record.reaction, Reaction::Superlike);
        assert!(record.is_live());
    }

    #[test]
    fn test_record_model_rejects_unknown_reaction() {
        let model = ReactionRecordModel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            target_id: Uuid::new_v4(),
            reaction: "wink".to_string(),
            is_match: false,
            created_at: Utc::now(),
            deleted_at: None,
        };
        assert!(ReactionRecord::try_from(model).is_err());
    }

    #[test]
    fn test_seen_entry_location() {
        let model = SeenEntryModel {
            id: Uuid::new_v4(),
            public_id: 42,
            latitude: Some(52.52),
            longitude: Some(13.405),
            seen_at: Utc::now(),
        };
        let entry = SeenEntry::from(model);
        assert!(entry.user.is_located());
        assert_eq!(entry.user.public_id, PublicId::new(42));
    }
}
