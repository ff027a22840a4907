//! Discovery service
//!
//! Nearby candidate ranking with public-id cursor pagination. Located
//! viewers get the distance-ordered radius query; unlocated or anonymous
//! viewers fall back to a plain public-id walk with the same cursor
//! contract.

use tracing::instrument;

use ember_core::traits::CandidatePage;
use ember_core::value_objects::{PublicId, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Discovery service
pub struct DiscoveryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DiscoveryService<'a> {
    /// Create a new DiscoveryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn clamp_limit(&self, limit: i64) -> i64 {
        limit.clamp(1, self.ctx.discovery().max_page_size)
    }

    fn page_from(candidates: Vec<ember_core::entities::Candidate>, limit: i64) -> CandidatePage {
        let next_cursor = if candidates.len() as i64 >= limit {
            candidates.last().map(|c| c.public_id)
        } else {
            None
        };
        CandidatePage {
            candidates,
            next_cursor,
        }
    }

    /// Fetch a page of candidates around the viewer
    #[instrument(skip(self))]
    pub async fn fetch_nearby(
        &self,
        viewer: Option<UserId>,
        radius_km: Option<f64>,
        cursor: Option<PublicId>,
        limit: i64,
    ) -> ServiceResult<CandidatePage> {
        let limit = self.clamp_limit(limit);
        let radius_km = radius_km.unwrap_or(self.ctx.discovery().default_radius_km);

        // A viewer with a known location gets the distance-ordered query;
        // everyone else pages by public id.
        if let Some(viewer_id) = viewer {
            let origin = self
                .ctx
                .candidate_repo()
                .find_by_id(viewer_id)
                .await?
                .and_then(|c| c.location);

            if let Some(origin) = origin {
                let candidates = self
                    .ctx
                    .candidate_repo()
                    .nearby(origin, viewer_id, radius_km, cursor, limit)
                    .await?;
                return Ok(Self::page_from(candidates, limit));
            }
        }

        let candidates = self
            .ctx
            .candidate_repo()
            .page_by_public_id(viewer, cursor, limit)
            .await?;
        Ok(Self::page_from(candidates, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::entities::Candidate;

    fn candidate(public_id: i64) -> Candidate {
        Candidate::new(UserId::generate(), PublicId::new(public_id), None)
    }

    #[test]
    fn test_full_page_yields_next_cursor() {
        let page = DiscoveryService::page_from(vec![candidate(3), candidate(7)], 2);
        assert_eq!(page.next_cursor, Some(PublicId::new(7)));
    }

    #[test]
    fn test_short_page_ends_pagination() {
        let page = DiscoveryService::page_from(vec![candidate(3)], 2);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_empty_page_ends_pagination() {
        let page = DiscoveryService::page_from(vec![], 2);
        assert!(page.candidates.is_empty());
        assert_eq!(page.next_cursor, None);
    }
}
