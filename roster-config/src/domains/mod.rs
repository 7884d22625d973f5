//! Domain-specific configuration modules

pub mod cache;
pub mod logging;
pub mod pagination;
pub mod seed;
pub mod server;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main Roster configuration combining all domains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub server: server::ServerConfig,
    pub logging: logging::LoggingConfig,
    pub pagination: pagination::PaginationConfig,
    pub cache: cache::CacheConfig,
    pub seed: seed::SeedConfig,
}

impl RosterConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.logging.validate()?;
        self.pagination.validate()?;
        self.cache.validate()?;
        self.seed.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        serde_yaml::to_string(&RosterConfig::default())
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
