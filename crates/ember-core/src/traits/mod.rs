//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CandidatePage, CandidateRepository, CounterpartFilter, EngagementRepository, ReactionLedger,
    RepoResult, SeenEntry, SeenQuery,
};
