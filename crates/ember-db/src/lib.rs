//! # ember-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `ember-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ember_db::pool::{create_pool, DatabaseConfig};
//! use ember_db::PgReactionLedger;
//! use ember_core::ReactionLedger;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let ledger = PgReactionLedger::new(pool);
//!
//!     // Use the ledger...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgCandidateRepository, PgEngagementRepository, PgReactionLedger};

/// Embedded migrations for the core schema
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
