//! # ember-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    DiscoveryService, EngagementService, MatchService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
