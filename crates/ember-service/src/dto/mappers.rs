//! Entity to DTO mappers and request parsing
//!
//! Implements `From` conversions from domain entities to response DTOs, and
//! parsing of stringly request fields into their typed domain forms.

use uuid::Uuid;

use ember_core::entities::{
    Candidate, EngagementDetail, EngagementKind, EngagementSummary, KindCount, Reaction,
    ReactionRecord,
};
use ember_core::traits::{CandidatePage, SeenEntry};
use ember_core::value_objects::{AggregateId, DetailId, Target, TargetKind, UserId};

use crate::services::engagement::ToggleOutcome;
use crate::services::matching::{SeenPage, ViewOutcome};
use crate::services::{ServiceError, ServiceResult};

use super::responses::{
    CandidatePageResponse, CandidateResponse, EngagementDetailResponse,
    EngagementSummaryResponse, KindCountResponse, ReactionRecordResponse, SeenEntryResponse,
    SeenPageResponse, ToggleResponse, ViewResponse,
};

// ============================================================================
// Request Parsing
// ============================================================================

/// Parse a user id from its request string form
pub fn parse_user_id(raw: &str) -> ServiceResult<UserId> {
    UserId::parse(raw).map_err(|_| ServiceError::validation(format!("invalid user id: {raw}")))
}

/// Parse an aggregate id from its request string form
pub fn parse_aggregate_id(raw: &str) -> ServiceResult<AggregateId> {
    AggregateId::parse(raw)
        .map_err(|_| ServiceError::validation(format!("invalid aggregate id: {raw}")))
}

/// Parse a detail id from its request string form
pub fn parse_detail_id(raw: &str) -> ServiceResult<DetailId> {
    DetailId::parse(raw).map_err(|_| ServiceError::validation(format!("invalid detail id: {raw}")))
}

/// Parse a (kind, id) request pair into a typed target
pub fn parse_target(kind: &str, id: &str) -> ServiceResult<Target> {
    let kind = TargetKind::parse(kind)?;
    let id = Uuid::parse_str(id)
        .map_err(|_| ServiceError::validation(format!("invalid target id: {id}")))?;
    Ok(Target::from_parts(kind, id))
}

/// Parse an engagement kind code
pub fn parse_kind(raw: &str) -> ServiceResult<EngagementKind> {
    Ok(EngagementKind::parse(raw)?)
}

/// Parse a reaction code
pub fn parse_reaction(raw: &str) -> ServiceResult<Reaction> {
    Ok(Reaction::parse(raw)?)
}

/// Strictly parse a gift amount, rejecting malformed or negative input.
///
/// Callers that prefer the lenient count-still-applies policy go through
/// `EngagementService::resolve_action` instead.
pub fn parse_amount(raw: &str) -> ServiceResult<rust_decimal::Decimal> {
    use std::str::FromStr;

    match rust_decimal::Decimal::from_str(raw) {
        Ok(value) if value >= rust_decimal::Decimal::ZERO => Ok(value),
        _ => Err(ember_core::DomainError::InvalidAmount(raw.to_string()).into()),
    }
}

// ============================================================================
// Engagement Mappers
// ============================================================================

impl From<&KindCount> for KindCountResponse {
    fn from(count: &KindCount) -> Self {
        Self {
            kind: count.kind.as_str().to_string(),
            count: count.count,
            amount: count.amount.to_string(),
        }
    }
}

impl From<&EngagementSummary> for EngagementSummaryResponse {
    fn from(summary: &EngagementSummary) -> Self {
        Self {
            aggregate_id: summary.aggregate.id.to_string(),
            target_kind: summary.aggregate.target.kind().as_str().to_string(),
            target_id: summary.aggregate.target.id().to_string(),
            counts: summary.counts.iter().map(KindCountResponse::from).collect(),
            updated_at: summary.aggregate.updated_at,
        }
    }
}

impl From<&EngagementDetail> for EngagementDetailResponse {
    fn from(detail: &EngagementDetail) -> Self {
        Self {
            id: detail.id.to_string(),
            aggregate_id: detail.aggregate_id.to_string(),
            engager_id: detail.engager_id.to_string(),
            recipient_id: detail.recipient_id.to_string(),
            kind: detail.kind().as_str().to_string(),
            amount: detail.action.amount().map(|a| a.to_string()),
            created_at: detail.created_at,
        }
    }
}

impl From<&ToggleOutcome> for ToggleResponse {
    fn from(outcome: &ToggleOutcome) -> Self {
        Self {
            aggregate_id: outcome.aggregate_id.to_string(),
            engaged: outcome.engaged,
        }
    }
}

// ============================================================================
// Match Mappers
// ============================================================================

impl From<&ReactionRecord> for ReactionRecordResponse {
    fn from(record: &ReactionRecord) -> Self {
        Self {
            id: record.id.to_string(),
            user_id: record.user_id.to_string(),
            target_id: record.target_id.to_string(),
            reaction: record.reaction.as_str().to_string(),
            is_match: record.is_match,
            created_at: record.created_at,
        }
    }
}

impl From<&ViewOutcome> for ViewResponse {
    fn from(outcome: &ViewOutcome) -> Self {
        Self {
            record: ReactionRecordResponse::from(&outcome.record),
            matched: outcome.matched,
        }
    }
}

impl From<&SeenEntry> for SeenEntryResponse {
    fn from(entry: &SeenEntry) -> Self {
        Self {
            user: CandidateResponse::from(&entry.user),
            seen_at: entry.seen_at,
        }
    }
}

impl From<&SeenPage> for SeenPageResponse {
    fn from(page: &SeenPage) -> Self {
        Self {
            entries: page.entries.iter().map(SeenEntryResponse::from).collect(),
            next_cursor: page.next_cursor,
        }
    }
}

// ============================================================================
// Discovery Mappers
// ============================================================================

impl From<&Candidate> for CandidateResponse {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.to_string(),
            public_id: candidate.public_id.into_inner(),
            latitude: candidate.location.map(|p| p.latitude),
            longitude: candidate.location.map(|p| p.longitude),
        }
    }
}

impl From<&CandidatePage> for CandidatePageResponse {
    fn from(page: &CandidatePage) -> Self {
        Self {
            candidates: page.candidates.iter().map(CandidateResponse::from).collect(),
            next_cursor: page.next_cursor.map(|c| c.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::value_objects::PublicId;

    #[test]
    fn test_parse_target_roundtrip() {
        let id = Uuid::new_v4();
        let target = parse_target("post", &id.to_string()).unwrap();
        assert_eq!(target, Target::Post(id));
    }

    #[test]
    fn test_parse_target_rejects_unknown_kind() {
        let err = parse_target("emoji", &Uuid::new_v4().to_string()).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_TARGET_KIND");
    }

    #[test]
    fn test_parse_user_id_rejects_garbage() {
        let err = parse_user_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_parse_amount_strict() {
        assert!(parse_amount("12.50").is_ok());
        assert_eq!(parse_amount("12,50").unwrap_err().error_code(), "INVALID_AMOUNT");
        assert_eq!(parse_amount("-1").unwrap_err().error_code(), "INVALID_AMOUNT");
    }

    #[test]
    fn test_candidate_response_flattens_location() {
        let candidate = Candidate::new(
            UserId::generate(),
            PublicId::new(42),
            Some(ember_core::value_objects::GeoPoint::new_unchecked(1.5, 2.5)),
        );
        let response = CandidateResponse::from(&candidate);
        assert_eq!(response.public_id, 42);
        assert_eq!(response.latitude, Some(1.5));
    }

    #[test]
    fn test_detail_response_omits_missing_amount() {
        let detail = EngagementDetail::new(
            AggregateId::generate(),
            UserId::generate(),
            UserId::generate(),
            ember_core::entities::EngagementAction::Bookmark,
        );
        let response = EngagementDetailResponse::from(&detail);
        assert!(response.amount.is_none());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("amount").is_none());
    }
}
