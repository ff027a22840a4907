//! Engagement entity <-> model mappers

use ember_core::entities::{
    EngagementAction, EngagementAggregate, EngagementDetail, EngagementKind, KindCount,
};
use ember_core::error::DomainError;
use ember_core::value_objects::{AggregateId, DetailId, Target, TargetKind, UserId};

use crate::models::{AggregateModel, CounterModel, DetailModel};

/// Convert AggregateModel to EngagementAggregate entity
impl TryFrom<AggregateModel> for EngagementAggregate {
    type Error = DomainError;

    fn try_from(model: AggregateModel) -> Result<Self, Self::Error> {
        let kind = TargetKind::parse(&model.target_kind)?;
        Ok(EngagementAggregate {
            id: AggregateId::from_uuid(model.id),
            target: Target::from_parts(kind, model.target_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Convert CounterModel to KindCount
impl TryFrom<CounterModel> for KindCount {
    type Error = DomainError;

    fn try_from(model: CounterModel) -> Result<Self, Self::Error> {
        Ok(KindCount {
            kind: EngagementKind::parse(&model.kind)?,
            count: model.count,
            amount: model.amount,
        })
    }
}

/// Convert DetailModel to EngagementDetail entity
impl TryFrom<DetailModel> for EngagementDetail {
    type Error = DomainError;

    fn try_from(model: DetailModel) -> Result<Self, Self::Error> {
        let kind = EngagementKind::parse(&model.kind)?;
        Ok(EngagementDetail {
            id: DetailId::from_uuid(model.id),
            aggregate_id: AggregateId::from_uuid(model.aggregate_id),
            engager_id: UserId::from_uuid(model.engager_id),
            recipient_id: UserId::from_uuid(model.recipient_id),
            action: EngagementAction::from_parts(kind, model.amount),
            created_at: model.created_at,
            deleted_at: model.deleted_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn test_aggregate_roundtrip() {
        let model = AggregateModel {
            id: Uuid::new_v4(),
            target_id: Uuid::new_v4(),
            target_kind: "post".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let aggregate = EngagementAggregate::try_from(model.clone()).unwrap();
        assert_eq!(aggregate.target.kind(), TargetKind::Post);
        assert_eq!(aggregate.target.id(), model.target_id);
    }

    #[test]
    fn test_gift_detail_carries_amount() {
        let model = DetailModel {
            id: Uuid::new_v4(),
            aggregate_id: Uuid::new_v4(),
            engager_id: Uuid::new_v4(),
            recipient_id: Uuid::new_v4(),
            kind: "gift".to_string(),
            amount: Some(Decimal::new(999, 2)),
            created_at: Utc::now(),
            deleted_at: None,
        };
        let detail = EngagementDetail::try_from(model).unwrap();
        assert_eq!(detail.action.amount(), Some(Decimal::new(999, 2)));
        assert_eq!(detail.kind(), EngagementKind::Gift);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let model = CounterModel {
            kind: "applause".to_string(),
            count: 1,
            amount: Decimal::ZERO,
        };
        assert!(KindCount::try_from(model).is_err());
    }
}
