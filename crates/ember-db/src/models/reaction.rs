//! Reaction ledger database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the reaction_records table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionRecordModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_id: Uuid,
    pub reaction: String,
    pub is_match: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Row shape of counterpart-page queries: the counterpart user joined with
/// the timestamp of the actor's record
#[derive(Debug, Clone, FromRow)]
pub struct SeenEntryModel {
    pub id: Uuid,
    pub public_id: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub seen_at: DateTime<Utc>,
}
