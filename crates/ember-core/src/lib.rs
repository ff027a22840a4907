//! # ember-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Candidate, EngagementAction, EngagementAggregate, EngagementDetail, EngagementKind,
    EngagementSummary, KindCount, Reaction, ReactionRecord,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    CandidatePage, CandidateRepository, CounterpartFilter, EngagementRepository, ReactionLedger,
    RepoResult, SeenEntry, SeenQuery,
};
pub use value_objects::{
    AggregateId, DetailId, GeoPoint, IdParseError, PublicId, Target, TargetKind, UserId,
};
