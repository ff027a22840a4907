//! Engagement service
//!
//! Typed interaction counting: toggles, direct detail writes, and the
//! aggregate/counter read side.

use chrono::Utc;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{info, instrument, warn};

use ember_core::entities::{
    EngagementAction, EngagementDetail, EngagementKind, EngagementSummary,
};
use ember_core::events::{DomainEvent, EngagementToggledEvent};
use ember_core::value_objects::{AggregateId, DetailId, Target, UserId};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Outcome of a toggle: the new state plus the event describing it
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub aggregate_id: AggregateId,
    /// `true` when the toggle created the engagement, `false` when it
    /// removed it
    pub engaged: bool,
    pub event: DomainEvent,
}

/// Engagement service
pub struct EngagementService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EngagementService<'a> {
    /// Create a new EngagementService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Build the typed action for a kind and an optional caller-supplied
    /// amount string.
    ///
    /// A malformed amount on a gift does not fail the request: the count
    /// still applies and the amount contribution is dropped, logged at warn.
    /// The count is the authoritative figure; the accrued amount is a
    /// best-effort projection.
    pub fn resolve_action(kind: EngagementKind, raw_amount: Option<&str>) -> EngagementAction {
        if !kind.is_monetary() {
            return EngagementAction::from_parts(kind, None);
        }

        let amount = match raw_amount {
            Some(raw) => match Decimal::from_str(raw) {
                Ok(value) if value >= Decimal::ZERO => value,
                Ok(value) => {
                    warn!(%value, "negative gift amount, counting without it");
                    Decimal::ZERO
                }
                Err(_) => {
                    warn!(raw, "unparseable gift amount, counting without it");
                    Decimal::ZERO
                }
            },
            None => Decimal::ZERO,
        };
        EngagementAction::Gift { amount }
    }

    /// Toggle an engagement on or off for a target
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        engager_id: UserId,
        recipient_id: UserId,
        target: Target,
        action: EngagementAction,
    ) -> ServiceResult<ToggleOutcome> {
        let aggregate = self
            .ctx
            .engagement_repo()
            .get_or_create_aggregate(target)
            .await?;

        let detail = EngagementDetail::new(aggregate.id, engager_id, recipient_id, action);
        let engaged = self.ctx.engagement_repo().toggle(&detail).await?;

        info!(
            aggregate_id = %aggregate.id,
            engager_id = %engager_id,
            kind = %action.kind(),
            engaged,
            "Engagement toggled"
        );

        let event = DomainEvent::EngagementToggled(EngagementToggledEvent {
            engager_id,
            recipient_id,
            target,
            kind: action.kind(),
            engaged,
            toggled_at: Utc::now(),
        });

        Ok(ToggleOutcome {
            aggregate_id: aggregate.id,
            engaged,
            event,
        })
    }

    /// Record a non-toggle engagement (gifts stack rather than alternate)
    #[instrument(skip(self))]
    pub async fn create_detail(
        &self,
        aggregate_id: AggregateId,
        engager_id: UserId,
        recipient_id: UserId,
        action: EngagementAction,
    ) -> ServiceResult<EngagementDetail> {
        let detail = EngagementDetail::new(aggregate_id, engager_id, recipient_id, action);
        self.ctx.engagement_repo().create_detail(&detail).await?;

        info!(
            aggregate_id = %aggregate_id,
            engager_id = %engager_id,
            kind = %action.kind(),
            "Engagement detail created"
        );

        Ok(detail)
    }

    /// Remove a previously recorded engagement detail
    #[instrument(skip(self))]
    pub async fn remove_detail(&self, detail_id: DetailId) -> ServiceResult<()> {
        self.ctx.engagement_repo().remove_detail(detail_id).await?;

        info!(detail_id = %detail_id, "Engagement detail removed");
        Ok(())
    }

    /// Whether the engager currently has a live engagement of this kind
    #[instrument(skip(self))]
    pub async fn has_engaged(
        &self,
        aggregate_id: AggregateId,
        engager_id: UserId,
        kind: EngagementKind,
    ) -> ServiceResult<bool> {
        Ok(self
            .ctx
            .engagement_repo()
            .has_engaged(aggregate_id, engager_id, kind)
            .await?)
    }

    /// The aggregate and its counters for a target
    #[instrument(skip(self))]
    pub async fn get_engagement(&self, target: Target) -> ServiceResult<EngagementSummary> {
        let aggregate = self
            .ctx
            .engagement_repo()
            .find_aggregate(target)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Engagement aggregate", target.id().to_string())
            })?;

        let counts = self.ctx.engagement_repo().counters(aggregate.id).await?;

        Ok(EngagementSummary { aggregate, counts })
    }

    /// Live details for an aggregate, newest first
    #[instrument(skip(self))]
    pub async fn list_details(
        &self,
        aggregate_id: AggregateId,
        kind: Option<EngagementKind>,
    ) -> ServiceResult<Vec<EngagementDetail>> {
        self.ctx
            .engagement_repo()
            .find_aggregate_by_id(aggregate_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Engagement aggregate", aggregate_id.to_string())
            })?;

        Ok(self
            .ctx
            .engagement_repo()
            .list_details(aggregate_id, kind)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_action_plain_kind_ignores_amount() {
        let action = EngagementService::resolve_action(EngagementKind::Follower, Some("10"));
        assert_eq!(action, EngagementAction::Follower);
        assert_eq!(action.amount(), None);
    }

    #[test]
    fn test_resolve_action_gift_parses_amount() {
        let action = EngagementService::resolve_action(EngagementKind::Gift, Some("12.50"));
        assert_eq!(action.amount(), Some(Decimal::new(1250, 2)));
    }

    #[test]
    fn test_resolve_action_malformed_amount_still_counts() {
        let action = EngagementService::resolve_action(EngagementKind::Gift, Some("12,50"));
        assert_eq!(action.kind(), EngagementKind::Gift);
        assert_eq!(action.amount(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_resolve_action_negative_amount_dropped() {
        let action = EngagementService::resolve_action(EngagementKind::Gift, Some("-5"));
        assert_eq!(action.amount(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_resolve_action_missing_amount_defaults_to_zero() {
        let action = EngagementService::resolve_action(EngagementKind::Gift, None);
        assert_eq!(action.amount(), Some(Decimal::ZERO));
    }
}
