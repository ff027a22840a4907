//! Database models (SQLx `FromRow` row structs)

mod candidate;
mod engagement;
mod reaction;

pub use candidate::CandidateModel;
pub use engagement::{AggregateModel, CounterModel, DetailModel};
pub use reaction::{ReactionRecordModel, SeenEntryModel};
