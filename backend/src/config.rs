//! Configuration management for Route Safety Commander
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/default.toml, then config/{environment}.toml)
//! 3. Environment variable overrides with RSC_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{validate_route, Route};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// National Weather Service API configuration
    pub nws: NwsConfig,

    /// Trip planning defaults
    pub planning: PlanningConfig,

    /// Route definitions
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NwsConfig {
    /// API base URL, used for alert lookups
    pub api_endpoint: String,

    /// User-Agent header; api.weather.gov rejects anonymous clients
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// How long a fetched forecast or alert list stays fresh, in seconds
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlanningConfig {
    /// Number of days offered for planning
    pub planning_days: usize,

    /// Hazard reasons kept in a verdict
    pub max_reasons: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RSC_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("nws.api_endpoint", "https://api.weather.gov")?
            .set_default(
                "nws.user_agent",
                "(route-safety-commander, contact@example.com)",
            )?
            .set_default("nws.timeout_secs", 5)?
            .set_default("nws.cache_ttl_secs", 1800)?
            .set_default("planning.planning_days", shared::analysis::DEFAULT_PLANNING_DAYS as i64)?
            .set_default("planning.max_reasons", shared::analysis::DEFAULT_MAX_REASONS as i64)?
            // Route table shared by every environment
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (RSC_ prefix)
            .add_source(
                Environment::with_prefix("RSC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject invalid or duplicate routes before serving anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut ids: Vec<&str> = Vec::new();
        for route in &self.routes {
            validate_route(route)
                .map_err(|e| ConfigError::Message(format!("route {}: {}", route.id, e)))?;
            if ids.contains(&route.id.as_str()) {
                return Err(ConfigError::Message(format!(
                    "duplicate route id: {}",
                    route.id
                )));
            }
            ids.push(&route.id);
        }
        if self.planning.planning_days == 0 || self.planning.max_reasons == 0 {
            return Err(ConfigError::Message(
                "planning.planning_days and planning.max_reasons must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }
}
