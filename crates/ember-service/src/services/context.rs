//! Service context - dependency container for services
//!
//! Holds the repositories and configuration every service needs. All
//! dependencies are injected at construction, so tests can swap in their own
//! trait implementations.

use std::sync::Arc;

use ember_common::DiscoveryConfig;
use ember_core::traits::{CandidateRepository, EngagementRepository, ReactionLedger};
use sqlx::PgPool;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    discovery: DiscoveryConfig,

    reaction_ledger: Arc<dyn ReactionLedger>,
    engagement_repo: Arc<dyn EngagementRepository>,
    candidate_repo: Arc<dyn CandidateRepository>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        discovery: DiscoveryConfig,
        reaction_ledger: Arc<dyn ReactionLedger>,
        engagement_repo: Arc<dyn EngagementRepository>,
        candidate_repo: Arc<dyn CandidateRepository>,
    ) -> Self {
        Self {
            pool,
            discovery,
            reaction_ledger,
            engagement_repo,
            candidate_repo,
        }
    }

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the discovery tuning parameters
    pub fn discovery(&self) -> &DiscoveryConfig {
        &self.discovery
    }

    /// Get the reaction ledger
    pub fn reaction_ledger(&self) -> &dyn ReactionLedger {
        self.reaction_ledger.as_ref()
    }

    /// Get the engagement repository
    pub fn engagement_repo(&self) -> &dyn EngagementRepository {
        self.engagement_repo.as_ref()
    }

    /// Get the candidate repository
    pub fn candidate_repo(&self) -> &dyn CandidateRepository {
        self.candidate_repo.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("discovery", &self.discovery)
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    discovery: DiscoveryConfig,
    reaction_ledger: Option<Arc<dyn ReactionLedger>>,
    engagement_repo: Option<Arc<dyn EngagementRepository>>,
    candidate_repo: Option<Arc<dyn CandidateRepository>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            discovery: DiscoveryConfig::default(),
            reaction_ledger: None,
            engagement_repo: None,
            candidate_repo: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn discovery(mut self, discovery: DiscoveryConfig) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn reaction_ledger(mut self, ledger: Arc<dyn ReactionLedger>) -> Self {
        self.reaction_ledger = Some(ledger);
        self
    }

    pub fn engagement_repo(mut self, repo: Arc<dyn EngagementRepository>) -> Self {
        self.engagement_repo = Some(repo);
        self
    }

    pub fn candidate_repo(mut self, repo: Arc<dyn CandidateRepository>) -> Self {
        self.candidate_repo = Some(repo);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| super::error::ServiceError::validation("pool is required"))?,
            self.discovery,
            self.reaction_ledger.ok_or_else(|| {
                super::error::ServiceError::validation("reaction_ledger is required")
            })?,
            self.engagement_repo.ok_or_else(|| {
                super::error::ServiceError::validation("engagement_repo is required")
            })?,
            self.candidate_repo.ok_or_else(|| {
                super::error::ServiceError::validation("candidate_repo is required")
            })?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
