//! PostgreSQL repository implementations

mod candidate;
mod engagement;
mod error;
mod reaction;

pub use candidate::PgCandidateRepository;
pub use engagement::PgEngagementRepository;
pub use reaction::PgReactionLedger;
