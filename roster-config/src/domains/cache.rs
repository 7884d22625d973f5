//! Caching configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Parsed filter expressions kept in memory
    pub filter_cache_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { filter_cache_size: 128 }
    }
}

impl Validatable for CacheConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.filter_cache_size, "filter_cache_size", self.domain_name())
    }

    fn domain_name(&self) -> &'static str {
        "cache"
    }
}
