//! Candidate projection - the slice of a user the core reads
//!
//! Owned by the identity collaborator; consumed read-only by the match
//! resolver and the nearby ranker.

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoPoint, PublicId, UserId};

/// Read-only user projection offered in swipe decks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: UserId,
    pub public_id: PublicId,
    pub location: Option<GeoPoint>,
}

impl Candidate {
    /// Create a candidate projection
    pub fn new(id: UserId, public_id: PublicId, location: Option<GeoPoint>) -> Self {
        Self {
            id,
            public_id,
            location,
        }
    }

    /// Whether the candidate has a usable location for distance ranking
    #[inline]
    pub fn is_located(&self) -> bool {
        self.location.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_located() {
        let mut candidate = Candidate::new(UserId::generate(), PublicId::new(1), None);
        assert!(!candidate.is_located());

        candidate.location = Some(GeoPoint::new_unchecked(48.85, 2.35));
        assert!(candidate.is_located());
    }
}
