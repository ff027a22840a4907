//! Match service
//!
//! Swipe recording, mutual-match resolution, and the seen-history read side
//! over the reaction ledger.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};

use ember_core::entities::{Candidate, Reaction, ReactionRecord};
use ember_core::events::{DomainEvent, MatchCreatedEvent, ReactionRecordedEvent};
use ember_core::traits::{CounterpartFilter, SeenEntry, SeenQuery};
use ember_core::value_objects::UserId;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Outcome of recording a view: the stored record, whether it produced a
/// match, and the events for the notification collaborator
#[derive(Debug, Clone)]
pub struct ViewOutcome {
    pub record: ReactionRecord,
    pub matched: bool,
    pub events: Vec<DomainEvent>,
}

/// A page of seen-history counterparts with the cursor for the next page
#[derive(Debug, Clone)]
pub struct SeenPage {
    pub entries: Vec<SeenEntry>,
    /// `created_at` of the last entry; `None` when the page is short of the
    /// requested limit (end of results)
    pub next_cursor: Option<DateTime<Utc>>,
}

/// Match service
pub struct MatchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MatchService<'a> {
    /// Create a new MatchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn seen_window(&self) -> Duration {
        Duration::hours(self.ctx.discovery().seen_window_hours)
    }

    fn clamp_limit(&self, limit: i64) -> i64 {
        limit.clamp(1, self.ctx.discovery().max_page_size)
    }

    fn page_from(&self, entries: Vec<SeenEntry>, limit: i64) -> SeenPage {
        let next_cursor = if entries.len() as i64 >= limit {
            entries.last().map(|e| e.seen_at)
        } else {
            None
        };
        SeenPage {
            entries,
            next_cursor,
        }
    }

    /// Record a swipe and resolve a mutual match when one forms
    #[instrument(skip(self))]
    pub async fn record_view(
        &self,
        actor: UserId,
        target: UserId,
        reaction: Reaction,
    ) -> ServiceResult<ViewOutcome> {
        if actor == target {
            return Err(ServiceError::validation("cannot record a view on yourself"));
        }
        // The matched state is written by the resolver, never by a swipe
        if reaction == Reaction::Matched {
            return Err(ServiceError::validation(
                "matched is not a recordable reaction",
            ));
        }

        let (record, matched) = self
            .ctx
            .reaction_ledger()
            .record_view(actor, target, reaction)
            .await?;

        let mut events = vec![DomainEvent::ReactionRecorded(ReactionRecordedEvent {
            actor_id: actor,
            target_id: target,
            reaction,
            recorded_at: record.created_at,
        })];

        if matched {
            info!(actor = %actor, target = %target, "Mutual match created");
            events.push(DomainEvent::MatchCreated(MatchCreatedEvent {
                user_id: actor,
                counterpart_id: target,
                matched_at: Utc::now(),
            }));
        }

        Ok(ViewOutcome {
            record,
            matched,
            events,
        })
    }

    /// Whether both directions of the pair carry this reaction
    #[instrument(skip(self))]
    pub async fn is_matched(&self, a: UserId, b: UserId, reaction: Reaction) -> ServiceResult<bool> {
        let forward = self.ctx.reaction_ledger().exists(a, b, reaction).await?;
        if !forward {
            return Ok(false);
        }
        Ok(self.ctx.reaction_ledger().exists(b, a, reaction).await?)
    }

    /// Whether the actor recorded the target inside the trailing window
    #[instrument(skip(self))]
    pub async fn was_seen_recently(
        &self,
        actor: UserId,
        target: UserId,
        window_hours: Option<i64>,
    ) -> ServiceResult<bool> {
        let window = window_hours.map_or_else(|| self.seen_window(), Duration::hours);
        Ok(self
            .ctx
            .reaction_ledger()
            .seen_within(actor, target, window)
            .await?)
    }

    /// The actor's records, newest first
    #[instrument(skip(self))]
    pub async fn seen_history(
        &self,
        actor: UserId,
        limit: i64,
    ) -> ServiceResult<Vec<ReactionRecord>> {
        Ok(self
            .ctx
            .reaction_ledger()
            .seen_history(actor, self.clamp_limit(limit))
            .await?)
    }

    /// Page of mutual-match counterparts, newest first
    #[instrument(skip(self))]
    pub async fn matches_after(
        &self,
        actor: UserId,
        before: Option<DateTime<Utc>>,
        limit: i64,
    ) -> ServiceResult<SeenPage> {
        self.counterpart_page(actor, CounterpartFilter::Matches, before, limit)
            .await
    }

    /// Page of liked counterparts (matched pairs included), newest first
    #[instrument(skip(self))]
    pub async fn likes_after(
        &self,
        actor: UserId,
        before: Option<DateTime<Utc>>,
        limit: i64,
    ) -> ServiceResult<SeenPage> {
        self.counterpart_page(actor, CounterpartFilter::Likes, before, limit)
            .await
    }

    /// Page of passed-on counterparts, newest first
    #[instrument(skip(self))]
    pub async fn passes_after(
        &self,
        actor: UserId,
        before: Option<DateTime<Utc>>,
        limit: i64,
    ) -> ServiceResult<SeenPage> {
        self.counterpart_page(actor, CounterpartFilter::Passes, before, limit)
            .await
    }

    async fn counterpart_page(
        &self,
        actor: UserId,
        filter: CounterpartFilter,
        before: Option<DateTime<Utc>>,
        limit: i64,
    ) -> ServiceResult<SeenPage> {
        let limit = self.clamp_limit(limit);
        let entries = self
            .ctx
            .reaction_ledger()
            .counterparts_after(actor, filter, SeenQuery { before, limit })
            .await?;
        Ok(self.page_from(entries, limit))
    }

    /// Candidates the actor has not recorded within the lookback window
    #[instrument(skip(self))]
    pub async fn unseen_users(&self, actor: UserId, limit: i64) -> ServiceResult<Vec<Candidate>> {
        Ok(self
            .ctx
            .reaction_ledger()
            .unseen_candidates(actor, self.seen_window(), self.clamp_limit(limit))
            .await?)
    }
}
