//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. UUIDs and
//! monetary amounts are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Engagement Responses
// ============================================================================

/// One counter row: live count and accrued amount for a kind
#[derive(Debug, Clone, Serialize)]
pub struct KindCountResponse {
    pub kind: String,
    pub count: i64,
    /// Decimal string, "0" for non-monetary kinds
    pub amount: String,
}

/// Aggregate with its counters
#[derive(Debug, Serialize)]
pub struct EngagementSummaryResponse {
    pub aggregate_id: String,
    pub target_kind: String,
    pub target_id: String,
    pub counts: Vec<KindCountResponse>,
    pub updated_at: DateTime<Utc>,
}

/// A single engagement detail row
#[derive(Debug, Serialize)]
pub struct EngagementDetailResponse {
    pub id: String,
    pub aggregate_id: String,
    pub engager_id: String,
    pub recipient_id: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of a toggle
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub aggregate_id: String,
    pub engaged: bool,
}

// ============================================================================
// Match Responses
// ============================================================================

/// A stored swipe record
#[derive(Debug, Serialize)]
pub struct ReactionRecordResponse {
    pub id: String,
    pub user_id: String,
    pub target_id: String,
    pub reaction: String,
    pub is_match: bool,
    pub created_at: DateTime<Utc>,
}

/// Result of recording a view
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub record: ReactionRecordResponse,
    pub matched: bool,
}

/// One seen-history page entry
#[derive(Debug, Serialize)]
pub struct SeenEntryResponse {
    pub user: CandidateResponse,
    pub seen_at: DateTime<Utc>,
}

/// A page of seen-history entries
#[derive(Debug, Serialize)]
pub struct SeenPageResponse {
    pub entries: Vec<SeenEntryResponse>,
    /// Pass back as `before` to fetch the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<DateTime<Utc>>,
}

// ============================================================================
// Discovery Responses
// ============================================================================

/// A candidate offered in a swipe deck
#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub id: String,
    pub public_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// A page of candidates
#[derive(Debug, Serialize)]
pub struct CandidatePageResponse {
    pub candidates: Vec<CandidateResponse>,
    /// Pass back as `cursor` to fetch the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<i64>,
}
