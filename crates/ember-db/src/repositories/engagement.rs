//! PostgreSQL implementation of the EngagementRepository

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use ember_core::entities::{EngagementAggregate, EngagementDetail, EngagementKind, KindCount};
use ember_core::traits::{EngagementRepository, RepoResult};
use ember_core::value_objects::{AggregateId, DetailId, Target, UserId};
use ember_core::DomainError;

use crate::models::{AggregateModel, CounterModel, DetailModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of the EngagementRepository
#[derive(Clone)]
pub struct PgEngagementRepository {
    pool: PgPool,
}

impl PgEngagementRepository {
    /// Create a new PgEngagementRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn assert_aggregate_exists(
        tx: &mut Transaction<'_, Postgres>,
        aggregate_id: AggregateId,
    ) -> RepoResult<()> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM engagement_aggregates WHERE id = $1)",
        )
        .bind(aggregate_id.into_inner())
        .fetch_one(&mut **tx)
        .await
        .map_err(map_db_error)?;

        if exists {
            Ok(())
        } else {
            Err(DomainError::AggregateNotFound(aggregate_id))
        }
    }

    /// Insert the detail row. Two writers racing on the same live triple hit
    /// the partial unique index; the loser surfaces as a retryable conflict.
    async fn insert_detail(
        tx: &mut Transaction<'_, Postgres>,
        detail: &EngagementDetail,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO engagement_details
                (id, aggregate_id, engager_id, recipient_id, kind, amount, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(detail.id.into_inner())
        .bind(detail.aggregate_id.into_inner())
        .bind(detail.engager_id.into_inner())
        .bind(detail.recipient_id.into_inner())
        .bind(detail.kind().as_str())
        .bind(detail.action.amount())
        .bind(detail.created_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ConcurrencyConflict))?;

        Ok(())
    }

    async fn increment_counter(
        tx: &mut Transaction<'_, Postgres>,
        aggregate_id: AggregateId,
        kind: EngagementKind,
        amount: Decimal,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO engagement_counters (aggregate_id, kind, count, amount)
            VALUES ($1, $2, 1, $3)
            ON CONFLICT (aggregate_id, kind)
            DO UPDATE SET
                count = engagement_counters.count + 1,
                amount = engagement_counters.amount + EXCLUDED.amount
            "#,
        )
        .bind(aggregate_id.into_inner())
        .bind(kind.as_str())
        .bind(amount)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn decrement_counter(
        tx: &mut Transaction<'_, Postgres>,
        aggregate_id: AggregateId,
        kind: EngagementKind,
        amount: Decimal,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE engagement_counters
            SET count = GREATEST(count - 1, 0),
                amount = GREATEST(amount - $3, 0)
            WHERE aggregate_id = $1 AND kind = $2
            "#,
        )
        .bind(aggregate_id.into_inner())
        .bind(kind.as_str())
        .bind(amount)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn touch_aggregate(
        tx: &mut Transaction<'_, Postgres>,
        aggregate_id: AggregateId,
    ) -> RepoResult<()> {
        sqlx::query("UPDATE engagement_aggregates SET updated_at = NOW() WHERE id = $1")
            .bind(aggregate_id.into_inner())
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    /// Soft-delete the detail and decrement its counter inside the caller's
    /// transaction. `Ok(None)` means the row was already gone.
    async fn retire_detail(
        tx: &mut Transaction<'_, Postgres>,
        id: DetailId,
    ) -> RepoResult<Option<EngagementDetail>> {
        let model = sqlx::query_as::<_, DetailModel>(
            r#"
            UPDATE engagement_details
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, aggregate_id, engager_id, recipient_id, kind, amount,
                      created_at, deleted_at
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?;

        let Some(model) = model else {
            return Ok(None);
        };
        let detail = EngagementDetail::try_from(model)?;

        Self::decrement_counter(
            tx,
            detail.aggregate_id,
            detail.kind(),
            detail.action.amount().unwrap_or(Decimal::ZERO),
        )
        .await?;
        Self::touch_aggregate(tx, detail.aggregate_id).await?;

        Ok(Some(detail))
    }
}

#[async_trait]
impl EngagementRepository for PgEngagementRepository {
    #[instrument(skip(self))]
    async fn get_or_create_aggregate(&self, target: Target) -> RepoResult<EngagementAggregate> {
        // The upsert is a no-op update so RETURNING yields the existing row
        // instead of erroring on conflict.
        let model = sqlx::query_as::<_, AggregateModel>(
            r#"
            INSERT INTO engagement_aggregates (id, target_id, target_kind, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            ON CONFLICT (target_id, target_kind)
            DO UPDATE SET target_id = EXCLUDED.target_id
            RETURNING id, target_id, target_kind, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(target.id())
        .bind(target.kind().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        EngagementAggregate::try_from(model)
    }

    #[instrument(skip(self))]
    async fn find_aggregate(&self, target: Target) -> RepoResult<Option<EngagementAggregate>> {
        let result = sqlx::query_as::<_, AggregateModel>(
            r#"
            SELECT id, target_id, target_kind, created_at, updated_at
            FROM engagement_aggregates
            WHERE target_id = $1 AND target_kind = $2
            "#,
        )
        .bind(target.id())
        .bind(target.kind().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(EngagementAggregate::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_aggregate_by_id(
        &self,
        id: AggregateId,
    ) -> RepoResult<Option<EngagementAggregate>> {
        let result = sqlx::query_as::<_, AggregateModel>(
            r#"
            SELECT id, target_id, target_kind, created_at, updated_at
            FROM engagement_aggregates
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(EngagementAggregate::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn create_detail(&self, detail: &EngagementDetail) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::assert_aggregate_exists(&mut tx, detail.aggregate_id).await?;
        Self::insert_detail(&mut tx, detail).await?;
        Self::increment_counter(
            &mut tx,
            detail.aggregate_id,
            detail.kind(),
            detail.action.amount().unwrap_or(Decimal::ZERO),
        )
        .await?;
        Self::touch_aggregate(&mut tx, detail.aggregate_id).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_detail(&self, id: DetailId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        if Self::retire_detail(&mut tx, id).await?.is_none() {
            return Err(DomainError::DetailNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn toggle(&self, detail: &EngagementDetail) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::assert_aggregate_exists(&mut tx, detail.aggregate_id).await?;

        // Lock the live row (if any) so two toggles on the same triple
        // serialize instead of double-creating or double-deleting.
        let live: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM engagement_details
            WHERE aggregate_id = $1 AND engager_id = $2 AND kind = $3
              AND deleted_at IS NULL
            FOR UPDATE
            "#,
        )
        .bind(detail.aggregate_id.into_inner())
        .bind(detail.engager_id.into_inner())
        .bind(detail.kind().as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let engaged = match live {
            Some(existing_id) => {
                Self::retire_detail(&mut tx, DetailId::from_uuid(existing_id)).await?;
                false
            }
            None => {
                Self::insert_detail(&mut tx, detail).await?;
                Self::increment_counter(
                    &mut tx,
                    detail.aggregate_id,
                    detail.kind(),
                    detail.action.amount().unwrap_or(Decimal::ZERO),
                )
                .await?;
                Self::touch_aggregate(&mut tx, detail.aggregate_id).await?;
                true
            }
        };

        tx.commit().await.map_err(map_db_error)?;
        Ok(engaged)
    }

    #[instrument(skip(self))]
    async fn find_live_detail(
        &self,
        aggregate_id: AggregateId,
        engager_id: UserId,
        kind: EngagementKind,
    ) -> RepoResult<Option<EngagementDetail>> {
        let result = sqlx::query_as::<_, DetailModel>(
            r#"
            SELECT id, aggregate_id, engager_id, recipient_id, kind, amount,
                   created_at, deleted_at
            FROM engagement_details
            WHERE aggregate_id = $1 AND engager_id = $2 AND kind = $3
              AND deleted_at IS NULL
            "#,
        )
        .bind(aggregate_id.into_inner())
        .bind(engager_id.into_inner())
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(EngagementDetail::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_detail_by_id(&self, id: DetailId) -> RepoResult<Option<EngagementDetail>> {
        let result = sqlx::query_as::<_, DetailModel>(
            r#"
            SELECT id, aggregate_id, engager_id, recipient_id, kind, amount,
                   created_at, deleted_at
            FROM engagement_details
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(EngagementDetail::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_details(
        &self,
        aggregate_id: AggregateId,
        kind: Option<EngagementKind>,
    ) -> RepoResult<Vec<EngagementDetail>> {
        let results = sqlx::query_as::<_, DetailModel>(
            r#"
            SELECT id, aggregate_id, engager_id, recipient_id, kind, amount,
                   created_at, deleted_at
            FROM engagement_details
            WHERE aggregate_id = $1 AND deleted_at IS NULL
              AND ($2::text IS NULL OR kind = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(aggregate_id.into_inner())
        .bind(kind.map(|k| k.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(EngagementDetail::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn counters(&self, aggregate_id: AggregateId) -> RepoResult<Vec<KindCount>> {
        let results = sqlx::query_as::<_, CounterModel>(
            r#"
            SELECT kind, count, amount
            FROM engagement_counters
            WHERE aggregate_id = $1
            ORDER BY kind
            "#,
        )
        .bind(aggregate_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(KindCount::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn has_engaged(
        &self,
        aggregate_id: AggregateId,
        engager_id: UserId,
        kind: EngagementKind,
    ) -> RepoResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM engagement_details
                WHERE aggregate_id = $1 AND engager_id = $2 AND kind = $3
                  AND deleted_at IS NULL
            )
            "#,
        )
        .bind(aggregate_id.into_inner())
        .bind(engager_id.into_inner())
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgEngagementRepository>();
    }
}
