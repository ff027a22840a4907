//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; inputs that need shape checks
//! beyond deserialization also implement `Validate`. Ids arrive as strings
//! and are parsed into their typed forms by the mappers.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Engagement Requests
// ============================================================================

/// Toggle an engagement on a target
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ToggleEngagementRequest {
    /// Target kind code: "user" or "post"
    pub target_kind: String,

    /// Target id (UUID as string)
    pub target_id: String,

    /// User the engagement lands on
    pub recipient_id: String,

    /// Engagement kind code
    pub kind: String,

    /// Monetary amount for gift engagements, decimal string
    #[validate(length(max = 32, message = "Amount must be at most 32 characters"))]
    pub amount: Option<String>,
}

/// Record a non-toggle engagement detail on an existing aggregate
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EngagementDetailRequest {
    /// Aggregate id (UUID as string)
    pub aggregate_id: String,

    /// User the engagement lands on
    pub recipient_id: String,

    /// Engagement kind code
    pub kind: String,

    /// Monetary amount for gift engagements, decimal string
    #[validate(length(max = 32, message = "Amount must be at most 32 characters"))]
    pub amount: Option<String>,
}

/// Query for listing an aggregate's details
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListDetailsQuery {
    /// Optional kind code filter
    pub kind: Option<String>,
}

// ============================================================================
// Match Requests
// ============================================================================

/// Record a swipe on a candidate
#[derive(Debug, Clone, Deserialize)]
pub struct RecordViewRequest {
    /// Candidate id (UUID as string)
    pub target_id: String,

    /// Reaction code: "like", "dislike" or "superlike"
    pub reaction: String,
}

/// Cursor query over seen-history pages
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SeenPageQuery {
    /// Only entries strictly older than this instant
    pub before: Option<DateTime<Utc>>,

    /// Page size (clamped server-side)
    pub limit: Option<i64>,
}

// ============================================================================
// Discovery Requests
// ============================================================================

/// Nearby candidate page query
#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct NearbyQuery {
    /// Search radius in kilometers; server default applies when absent
    #[validate(range(min = 0.1, max = 20000.0, message = "Radius out of range"))]
    pub radius_km: Option<f64>,

    /// Public id cursor from the previous page
    pub cursor: Option<i64>,

    /// Page size (clamped server-side)
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_query_radius_validation() {
        let query = NearbyQuery {
            radius_km: Some(0.0),
            cursor: None,
            limit: None,
        };
        assert!(query.validate().is_err());

        let query = NearbyQuery {
            radius_km: Some(50.0),
            ..Default::default()
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_toggle_request_deserializes() {
        let json = r#"{
            "target_kind": "user",
            "target_id": "5f0c60ab-207f-4a31-8b9a-13d4c1f0c1aa",
            "recipient_id": "5f0c60ab-207f-4a31-8b9a-13d4c1f0c1aa",
            "kind": "gift",
            "amount": "12.50"
        }"#;
        let req: ToggleEngagementRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.kind, "gift");
        assert_eq!(req.amount.as_deref(), Some("12.50"));
    }
}
