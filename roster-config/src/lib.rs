//! Domain-split configuration for the Roster server
//!
//! Each domain (server, logging, pagination, cache, seed) owns its settings,
//! defaults and validation. [`ConfigLoader`] reads YAML and applies
//! `ROSTER_*` environment overrides on top.

pub mod domains;
pub mod error;
pub mod loader;
pub mod validation;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    cache::CacheConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    pagination::PaginationConfig,
    seed::SeedConfig,
    server::{CorsConfig, ServerConfig},
    RosterConfig,
};
