//! Candidate projection <-> model mapper

use ember_core::entities::Candidate;
use ember_core::value_objects::{GeoPoint, PublicId, UserId};

use crate::models::CandidateModel;

/// Convert CandidateModel to Candidate projection
impl From<CandidateModel> for Candidate {
    fn from(model: CandidateModel) -> Self {
        let location = match (model.latitude, model.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new_unchecked(lat, lng)),
            _ => None,
        };
        Candidate::new(
            UserId::from_uuid(model.id),
            PublicId::new(model.public_id),
            location,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_half_known_location_is_none() {
        let model = CandidateModel {
            id: Uuid::new_v4(),
            public_id: 1,
            latitude: Some(10.0),
            longitude: None,
        };
        assert!(!Candidate::from(model).is_located());
    }
}
