//! Domain entities

mod candidate;
mod engagement;
mod reaction_record;

pub use candidate::Candidate;
pub use engagement::{
    EngagementAction, EngagementAggregate, EngagementDetail, EngagementKind, EngagementSummary,
    KindCount,
};
pub use reaction_record::{Reaction, ReactionRecord};
