//! Value objects - immutable domain primitives

mod geo;
mod ids;
mod target;

pub use geo::GeoPoint;
pub use ids::{AggregateId, DetailId, IdParseError, PublicId, UserId};
pub use target::{Target, TargetKind};
