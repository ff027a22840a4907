//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod context;
pub mod discovery;
pub mod engagement;
pub mod error;
pub mod matching;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use discovery::DiscoveryService;
pub use engagement::{EngagementService, ToggleOutcome};
pub use error::{ServiceError, ServiceResult};
pub use matching::{MatchService, SeenPage, ViewOutcome};
