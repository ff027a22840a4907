//! Candidate projection database model

use sqlx::FromRow;
use uuid::Uuid;

/// Row shape of candidate queries against the users projection
#[derive(Debug, Clone, FromRow)]
pub struct CandidateModel {
    pub id: Uuid,
    pub public_id: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
