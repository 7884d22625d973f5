//! Configuration loading and environment variable handling

use crate::domains::RosterConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;

/// Loads [`RosterConfig`] from YAML, then applies `<PREFIX>_*` environment overrides
pub struct ConfigLoader {
    prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            prefix: "ROSTER".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<RosterConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: RosterConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<RosterConfig> {
        let mut config = RosterConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<RosterConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    fn apply_env_overrides(&self, config: &mut RosterConfig) -> ConfigResult<()> {
        if let Some(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.server.bind_address = bind;
        }
        if let Some(port) = self.parse_env_var("SERVER_PORT")? {
            config.server.port = port;
        }
        if let Some(prefix) = self.get_env_var("API_PREFIX") {
            config.server.api_prefix = prefix;
        }

        if let Some(level) = self.parse_env_var("LOG_LEVEL")? {
            config.logging.level = level;
        }
        if let Some(format) = self.parse_env_var("LOG_FORMAT")? {
            config.logging.format = format;
        }

        if let Some(limit) = self.parse_env_var("DEFAULT_LIMIT")? {
            config.pagination.default_limit = limit;
        }
        if let Some(sort) = self.get_env_var("DEFAULT_SORT") {
            config.pagination.default_sort = sort;
        }

        if let Some(size) = self.parse_env_var("FILTER_CACHE_SIZE")? {
            config.cache.filter_cache_size = size;
        }

        if let Some(quantity) = self.parse_env_var("SEED_QUANTITY")? {
            config.seed.quantity = quantity;
        }

        Ok(())
    }

    fn get_env_var(&self, name: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, name)).ok()
    }

    fn parse_env_var<T>(&self, name: &str) -> ConfigResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_env_var(name)
            .map(|raw| {
                raw.trim().parse::<T>().map_err(|e| {
                    ConfigError::EnvError(format!("Invalid {}_{}: {}", self.prefix, name, e))
                })
            })
            .transpose()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::logging::{LogFormat, LogLevel};

    #[test]
    fn test_env_overrides() {
        temp_env::with_vars(
            [
                ("ROSTER_SERVER_PORT", Some("9090")),
                ("ROSTER_LOG_LEVEL", Some("debug")),
                ("ROSTER_LOG_FORMAT", Some("json")),
                ("ROSTER_DEFAULT_LIMIT", Some("50")),
                ("ROSTER_SEED_QUANTITY", Some("10")),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap();
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.logging.level, LogLevel::Debug);
                assert_eq!(config.logging.format, LogFormat::Json);
                assert_eq!(config.pagination.default_limit, 50);
                assert_eq!(config.seed.quantity, 10);
            },
        );
    }

    #[test]
    fn test_invalid_env_value() {
        temp_env::with_var("ROSTER_SERVER_PORT", Some("eighty"), || {
            let err = ConfigLoader::new().from_env().unwrap_err();
            assert!(matches!(err, ConfigError::EnvError(_)));
            assert!(err.to_string().contains("ROSTER_SERVER_PORT"));
        });
    }

    #[test]
    fn test_overrides_are_validated() {
        temp_env::with_var("ROSTER_DEFAULT_LIMIT", Some("0"), || {
            let err = ConfigLoader::new().from_env().unwrap_err();
            assert!(matches!(err, ConfigError::DomainError { .. }));
        });
    }

    #[test]
    fn test_custom_prefix() {
        temp_env::with_var("PEOPLE_SERVER_PORT", Some("7000"), || {
            let config = ConfigLoader::with_prefix("PEOPLE").from_env().unwrap();
            assert_eq!(config.server.port, 7000);
        });
    }
}
