//! PostgreSQL implementation of the ReactionLedger

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use ember_core::entities::{Candidate, Reaction, ReactionRecord};
use ember_core::traits::{CounterpartFilter, ReactionLedger, RepoResult, SeenEntry, SeenQuery};
use ember_core::value_objects::UserId;
use ember_core::DomainError;

use crate::models::{CandidateModel, ReactionRecordModel, SeenEntryModel};

use super::error::{map_db_error, map_fk_violation};

/// PostgreSQL implementation of the ReactionLedger
#[derive(Clone)]
pub struct PgReactionLedger {
    pool: PgPool,
}

impl PgReactionLedger {
    /// Create a new PgReactionLedger
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Acceptable stored codes when asking "does this reaction exist".
    ///
    /// A `matched` row started life as a mutual like, so queries for `like`
    /// must keep matching it after the flip.
    fn reaction_codes(reaction: Reaction) -> (&'static str, &'static str) {
        match reaction {
            Reaction::Like => ("like", "matched"),
            other => (other.as_str(), other.as_str()),
        }
    }
}

#[async_trait]
impl ReactionLedger for PgReactionLedger {
    #[instrument(skip(self))]
    async fn record_view(
        &self,
        actor: UserId,
        target: UserId,
        reaction: Reaction,
    ) -> RepoResult<(ReactionRecord, bool)> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // One advisory lock per unordered pair, held to commit. Row locks
        // cannot serialize two first-time swipes (there is nothing to lock
        // yet), so both directions funnel through the same key and the
        // reverse check below always sees the latest committed state.
        sqlx::query(
            r#"
            SELECT pg_advisory_xact_lock(
                hashtext(LEAST($1::text, $2::text)),
                hashtext(GREATEST($1::text, $2::text))
            )
            "#,
        )
        .bind(actor.into_inner())
        .bind(target.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ReactionRecordModel>(
            r#"
            INSERT INTO reaction_records (id, user_id, target_id, reaction, is_match, created_at)
            VALUES ($1, $2, $3, $4, FALSE, NOW())
            ON CONFLICT (user_id, target_id)
            DO UPDATE SET reaction = EXCLUDED.reaction, is_match = FALSE,
                          created_at = NOW(), deleted_at = NULL
            RETURNING id, user_id, target_id, reaction, is_match, created_at, deleted_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(actor.into_inner())
        .bind(target.into_inner())
        .bind(reaction.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_fk_violation(e, || DomainError::UserNotFound(target)))?;

        let mut record = ReactionRecord::try_from(model)?;

        let mut matched = false;
        if reaction == Reaction::Like {
            let reverse: Option<String> = sqlx::query_scalar(
                r#"
                SELECT reaction FROM reaction_records
                WHERE user_id = $1 AND target_id = $2 AND deleted_at IS NULL
                "#,
            )
            .bind(target.into_inner())
            .bind(actor.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

            // A reverse row in the matched state is still a standing like
            // (re-liking an already-matched counterpart re-forms the match).
            if matches!(reverse.as_deref(), Some("like" | "matched")) {
                sqlx::query(
                    r#"
                    UPDATE reaction_records
                    SET reaction = 'matched', is_match = TRUE
                    WHERE (user_id = $1 AND target_id = $2) OR (user_id = $2 AND target_id = $1)
                    "#,
                )
                .bind(actor.into_inner())
                .bind(target.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

                record.mark_matched();
                matched = true;
            }
        } else {
            // A non-like overwrite ends any standing match; the counterpart
            // row reverts to the plain like it carried before the flip.
            sqlx::query(
                r#"
                UPDATE reaction_records
                SET reaction = 'like', is_match = FALSE
                WHERE user_id = $1 AND target_id = $2 AND reaction = 'matched'
                "#,
            )
            .bind(target.into_inner())
            .bind(actor.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok((record, matched))
    }

    #[instrument(skip(self))]
    async fn find(&self, actor: UserId, target: UserId) -> RepoResult<Option<ReactionRecord>> {
        let result = sqlx::query_as::<_, ReactionRecordModel>(
            r#"
            SELECT id, user_id, target_id, reaction, is_match, created_at, deleted_at
            FROM reaction_records
            WHERE user_id = $1 AND target_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(actor.into_inner())
        .bind(target.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ReactionRecord::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn exists(&self, actor: UserId, target: UserId, reaction: Reaction) -> RepoResult<bool> {
        let (code, alias) = Self::reaction_codes(reaction);

        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM reaction_records
                WHERE user_id = $1 AND target_id = $2 AND deleted_at IS NULL
                  AND reaction IN ($3, $4)
            )
            "#,
        )
        .bind(actor.into_inner())
        .bind(target.into_inner())
        .bind(code)
        .bind(alias)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn seen_within(
        &self,
        actor: UserId,
        target: UserId,
        window: Duration,
    ) -> RepoResult<bool> {
        let cutoff = Utc::now() - window;

        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM reaction_records
                WHERE user_id = $1 AND target_id = $2 AND deleted_at IS NULL
                  AND created_at >= $3
            )
            "#,
        )
        .bind(actor.into_inner())
        .bind(target.into_inner())
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn seen_history(&self, actor: UserId, limit: i64) -> RepoResult<Vec<ReactionRecord>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, ReactionRecordModel>(
            r#"
            SELECT id, user_id, target_id, reaction, is_match, created_at, deleted_at
            FROM reaction_records
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(actor.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results
            .into_iter()
            .map(ReactionRecord::try_from)
            .collect()
    }

    #[instrument(skip(self))]
    async fn counterparts_after(
        &self,
        actor: UserId,
        filter: CounterpartFilter,
        query: SeenQuery,
    ) -> RepoResult<Vec<SeenEntry>> {
        let limit = query.limit.clamp(1, 100);

        let filter_sql = match filter {
            CounterpartFilter::Matches => "r.is_match = TRUE",
            CounterpartFilter::Likes => "r.reaction IN ('like', 'matched')",
            CounterpartFilter::Passes => "r.reaction = 'dislike'",
        };

        let sql = format!(
            r#"
            SELECT u.id, u.public_id, u.latitude, u.longitude, r.created_at AS seen_at
            FROM reaction_records r
            JOIN users u ON u.id = r.target_id
            WHERE r.user_id = $1
              AND r.deleted_at IS NULL
              AND u.deleted_at IS NULL
              AND u.id <> $1
              AND {filter_sql}
              AND ($2::timestamptz IS NULL OR r.created_at < $2)
            ORDER BY r.created_at DESC
            LIMIT $3
            "#
        );

        let results = sqlx::query_as::<_, SeenEntryModel>(&sql)
            .bind(actor.into_inner())
            .bind(query.before)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(SeenEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn unseen_candidates(
        &self,
        actor: UserId,
        window: Duration,
        limit: i64,
    ) -> RepoResult<Vec<Candidate>> {
        let limit = limit.clamp(1, 100);
        let cutoff = Utc::now() - window;

        let results = sqlx::query_as::<_, CandidateModel>(
            r#"
            SELECT u.id, u.public_id, u.latitude, u.longitude
            FROM users u
            WHERE u.id <> $1
              AND u.deleted_at IS NULL
              AND NOT EXISTS (
                  SELECT 1 FROM reaction_records r
                  WHERE r.user_id = $1 AND r.target_id = u.id
                    AND r.deleted_at IS NULL AND r.created_at >= $2
              )
            ORDER BY RANDOM()
            LIMIT $3
            "#,
        )
        .bind(actor.into_inner())
        .bind(cutoff)
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
        assert_send_sync::<PgReactionLedger>();
    }

    #[test]
    fn test_like_queries_also_match_flipped_rows() {
        assert_eq!(
            PgReactionLedger::reaction_codes(Reaction::Like),
            ("like", "matched")
        );
        assert_eq!(
            PgReactionLedger::reaction_codes(Reaction::Dislike),
            ("dislike", "dislike")
        );
    }
}
