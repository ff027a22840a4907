//! Application configuration structs
//!
//! Loads configuration from environment variables and config files.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub discovery: DiscoveryConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Candidate discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Search radius in kilometers applied when the caller supplies none
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    /// Trailing window (hours) within which a seen candidate is not
    /// re-surfaced
    #[serde(default = "default_seen_window_hours")]
    pub seen_window_hours: i64,
    /// Hard cap on page sizes across the read endpoints
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            seen_window_hours: default_seen_window_hours(),
            max_page_size: default_max_page_size(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "ember".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_radius_km() -> f64 {
    50.0
}

fn default_seen_window_hours() -> i64 {
    24
}

fn default_max_page_size() -> i64 {
    100
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            discovery: DiscoveryConfig {
                default_radius_km: env::var("DISCOVERY_DEFAULT_RADIUS_KM")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_radius_km),
                seen_window_hours: env::var("DISCOVERY_SEEN_WINDOW_HOURS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_seen_window_hours),
                max_page_size: env::var("DISCOVERY_MAX_PAGE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_page_size),
            },
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_predicates() {
        assert!(Environment::Production.is_production());
        assert!(Environment::Development.is_development());
        assert!(!Environment::Staging.is_production());
    }

    #[test]
    fn test_discovery_defaults() {
        let discovery = DiscoveryConfig::default();
        assert!((discovery.default_radius_km - 50.0).abs() < f64::EPSILON);
        assert_eq!(discovery.seen_window_hours, 24);
        assert_eq!(discovery.max_page_size, 100);
    }
}
