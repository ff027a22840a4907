//! PostgreSQL implementation of the CandidateRepository
//!
//! Proximity search uses the `cube`/`earthdistance` extensions over plain
//! latitude/longitude columns: `earth_box` prunes via the GiST index and
//! `earth_distance` refines and orders the survivors.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ember_core::entities::Candidate;
use ember_core::traits::{CandidateRepository, RepoResult};
use ember_core::value_objects::{GeoPoint, PublicId, UserId};

use crate::models::CandidateModel;

use super::error::map_db_error;

// Multiplier applied to the requested radius (km) before handing it to
// earth_box/earth_distance, carried over from the production behavior this
// replaces. earth_distance returns meters, so the effective search radius is
// 100x the nominal kilometre figure.
// TODO: confirm with the discovery team whether the x100 overshoot is
// intentional before changing this to 1_000.0.
const RADIUS_UNITS_PER_KM: f64 = 100_000.0;

/// PostgreSQL implementation of the CandidateRepository
#[derive(Clone)]
pub struct PgCandidateRepository {
    pool: PgPool,
}

impl PgCandidateRepository {
    /// Create a new PgCandidateRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateRepository for PgCandidateRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<Candidate>> {
        let result = sqlx::query_as::<_, CandidateModel>(
            r#"
            SELECT id, public_id, latitude, longitude
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Candidate::from))
    }

    #[instrument(skip(self))]
    async fn nearby(
        &self,
        origin: GeoPoint,
        exclude: UserId,
        radius_km: f64,
        cursor: Option<PublicId>,
        limit: i64,
    ) -> RepoResult<Vec<Candidate>> {
        let radius = radius_km * RADIUS_UNITS_PER_KM;

        let results = sqlx::query_as::<_, CandidateModel>(
            r#"
            SELECT id, public_id, latitude, longitude
            FROM users
            WHERE deleted_at IS NULL
              AND id <> $1
              AND latitude IS NOT NULL AND longitude IS NOT NULL
              AND earth_box(ll_to_earth($2, $3), $4) @> ll_to_earth(latitude, longitude)
              AND earth_distance(ll_to_earth($2, $3), ll_to_earth(latitude, longitude)) <= $4
              AND ($5::bigint IS NULL OR public_id > $5)
            ORDER BY earth_distance(ll_to_earth($2, $3), ll_to_earth(latitude, longitude)) ASC,
                     public_id ASC
            LIMIT $6
            "#,
        )
        .bind(exclude.into_inner())
        .bind(origin.latitude)
        .bind(origin.longitude)
        .bind(radius)
        .bind(cursor.map(PublicId::into_inner))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Candidate::from).collect())
    }

    #[instrument(skip(self))]
    async fn page_by_public_id(
        &self,
        exclude: Option<UserId>,
        cursor: Option<PublicId>,
        limit: i64,
    ) -> RepoResult<Vec<Candidate>> {
        let results = sqlx::query_as::<_, CandidateModel>(
            r#"
            SELECT id, public_id, latitude, longitude
            FROM users
            WHERE deleted_at IS NULL
              AND ($1::uuid IS NULL OR id <> $1)
              AND ($2::bigint IS NULL OR public_id > $2)
            ORDER BY public_id ASC
            LIMIT $3
            "#,
        )
        .bind(exclude.map(UserId::into_inner))
        .bind(cursor.map(PublicId::into_inner))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Candidate::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCandidateRepository>();
    }

    #[test]
    fn test_radius_unit_factor() {
        assert!((50.0 * RADIUS_UNITS_PER_KM - 5_000_000.0).abs() < f64::EPSILON);
    }
}
