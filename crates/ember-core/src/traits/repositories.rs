//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Operations that must uphold a multi-row
//! invariant (counter maintenance, the mutual-match flip) are expressed as
//! single trait methods so implementations can run them inside one
//! transaction.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::entities::{
    Candidate, EngagementAggregate, EngagementDetail, EngagementKind, KindCount, Reaction,
    ReactionRecord,
};
use crate::error::DomainError;
use crate::value_objects::{AggregateId, DetailId, GeoPoint, PublicId, Target, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Ledger
// ============================================================================

/// Which counterpart projection a seen-history page selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterpartFilter {
    /// Pairs in the mutual-match state
    Matches,
    /// Outgoing likes that have not (yet) matched
    Likes,
    /// Outgoing dislikes
    Passes,
}

/// Cursor pagination over a time-ordered seen history
#[derive(Debug, Clone, Copy, Default)]
pub struct SeenQuery {
    /// Only records strictly older than this instant
    pub before: Option<DateTime<Utc>>,
    pub limit: i64,
}

/// One page entry: the counterpart user and when the record was written
#[derive(Debug, Clone, PartialEq)]
pub struct SeenEntry {
    pub user: Candidate,
    pub seen_at: DateTime<Utc>,
}

#[async_trait]
pub trait ReactionLedger: Send + Sync {
    /// Upsert the record for (actor, target) and, for a `Like`, flip both
    /// directions into the matched state when the reverse like exists - all
    /// inside one transaction. A non-like overwrite of a matched pair
    /// clears the match state on both sides; the counterpart keeps a plain
    /// like. Returns the stored record and whether this call produced a
    /// match.
    async fn record_view(
        &self,
        actor: UserId,
        target: UserId,
        reaction: Reaction,
    ) -> RepoResult<(ReactionRecord, bool)>;

    /// Find the live record for an ordered pair
    async fn find(&self, actor: UserId, target: UserId) -> RepoResult<Option<ReactionRecord>>;

    /// Check whether a live record with this reaction exists for the pair
    async fn exists(&self, actor: UserId, target: UserId, reaction: Reaction) -> RepoResult<bool>;

    /// Check whether the pair was recorded within the trailing window
    async fn seen_within(
        &self,
        actor: UserId,
        target: UserId,
        window: Duration,
    ) -> RepoResult<bool>;

    /// All records authored by the actor, newest first
    async fn seen_history(&self, actor: UserId, limit: i64) -> RepoResult<Vec<ReactionRecord>>;

    /// Counterpart users for the actor's records matching the filter,
    /// newest first, strictly before the cursor
    async fn counterparts_after(
        &self,
        actor: UserId,
        filter: CounterpartFilter,
        query: SeenQuery,
    ) -> RepoResult<Vec<SeenEntry>>;

    /// Users the actor has not recorded within the lookback window,
    /// excluding the actor and soft-deleted accounts, randomly ordered
    async fn unseen_candidates(
        &self,
        actor: UserId,
        window: Duration,
        limit: i64,
    ) -> RepoResult<Vec<Candidate>>;
}

// ============================================================================
// Engagement Repository
// ============================================================================

#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Load the aggregate for a target, creating it when absent
    async fn get_or_create_aggregate(&self, target: Target) -> RepoResult<EngagementAggregate>;

    /// Find the aggregate for a target
    async fn find_aggregate(&self, target: Target) -> RepoResult<Option<EngagementAggregate>>;

    /// Find an aggregate by its id
    async fn find_aggregate_by_id(
        &self,
        id: AggregateId,
    ) -> RepoResult<Option<EngagementAggregate>>;

    /// Insert a detail row and bump the matching counter (count, and amount
    /// for monetary kinds) in the same transaction. Fails with
    /// `AggregateNotFound` when the referenced aggregate does not exist.
    async fn create_detail(&self, detail: &EngagementDetail) -> RepoResult<()>;

    /// Soft-delete a detail row and decrement its counter, both clamped at
    /// zero, in the same transaction
    async fn remove_detail(&self, id: DetailId) -> RepoResult<()>;

    /// Toggle the (aggregate, engager, kind) triple: create the detail when
    /// no live one exists (returns `true`), soft-delete it otherwise
    /// (returns `false`). Racing toggles on the same triple surface as
    /// `ConcurrencyConflict`.
    async fn toggle(&self, detail: &EngagementDetail) -> RepoResult<bool>;

    /// Find the live detail for a toggle triple
    async fn find_live_detail(
        &self,
        aggregate_id: AggregateId,
        engager_id: UserId,
        kind: EngagementKind,
    ) -> RepoResult<Option<EngagementDetail>>;

    /// Find a detail by id (live rows only)
    async fn find_detail_by_id(&self, id: DetailId) -> RepoResult<Option<EngagementDetail>>;

    /// Live details for an aggregate, newest first, optionally kind-filtered
    async fn list_details(
        &self,
        aggregate_id: AggregateId,
        kind: Option<EngagementKind>,
    ) -> RepoResult<Vec<EngagementDetail>>;

    /// All counters for an aggregate
    async fn counters(&self, aggregate_id: AggregateId) -> RepoResult<Vec<KindCount>>;

    /// Whether the engager has a live detail of this kind on the aggregate
    async fn has_engaged(
        &self,
        aggregate_id: AggregateId,
        engager_id: UserId,
        kind: EngagementKind,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Candidate Repository
// ============================================================================

/// A page of candidates plus the cursor for the next page
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePage {
    pub candidates: Vec<Candidate>,
    /// Public id of the last candidate; `None` when the page is short of
    /// the requested limit (end of results)
    pub next_cursor: Option<PublicId>,
}

#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Find a candidate projection by user id
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<Candidate>>;

    /// Candidates within the radius of `origin`, ordered ascending by
    /// distance with `public_id` as the tiebreak, restricted to
    /// `public_id > cursor`
    async fn nearby(
        &self,
        origin: GeoPoint,
        exclude: UserId,
        radius_km: f64,
        cursor: Option<PublicId>,
        limit: i64,
    ) -> RepoResult<Vec<Candidate>>;

    /// Fallback page ordered ascending by public id with the same cursor
    /// contract, for unlocated or anonymous viewers
    async fn page_by_public_id(
        &self,
        exclude: Option<UserId>,
        cursor: Option<PublicId>,
        limit: i64,
    ) -> RepoResult<Vec<Candidate>>;
}
