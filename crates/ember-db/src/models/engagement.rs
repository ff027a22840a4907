//! Engagement database models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the engagement_aggregates table
#[derive(Debug, Clone, FromRow)]
pub struct AggregateModel {
    pub id: Uuid,
    pub target_id: Uuid,
    pub target_kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for one engagement_counters row
#[derive(Debug, Clone, FromRow)]
pub struct CounterModel {
    pub kind: String,
    pub count: i64,
    pub amount: Decimal,
}

/// Database model for the engagement_details table
#[derive(Debug, Clone, FromRow)]
pub struct DetailModel {
    pub id: Uuid,
    pub aggregate_id: Uuid,
    pub engager_id: Uuid,
    pub recipient_id: Uuid,
    pub kind: String,
    pub amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
