//! List endpoint defaults

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};

/// Values used when a list request omits `limit` or `sort`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_limit: i64,
    /// `attribute:asc|desc`, checked against each resource when used
    pub default_sort: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            default_sort: "id:asc".to_string(),
        }
    }
}

impl Validatable for PaginationConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.default_limit, "default_limit", self.domain_name())?;
        validate_required_string(&self.default_sort, "default_sort", self.domain_name())?;

        match self.default_sort.split_once(':') {
            Some((attribute, direction))
                if !attribute.is_empty() && matches!(direction.to_lowercase().as_str(), "asc" | "desc") =>
            {
                Ok(())
            }
            _ => Err(self.validation_error(format!(
                "default_sort must match attribute:asc or attribute:desc, got '{}'",
                self.default_sort
            ))),
        }
    }

    fn domain_name(&self) -> &'static str {
        "pagination"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_validation() {
        assert!(PaginationConfig::default().validate().is_ok());

        let config = PaginationConfig {
            default_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PaginationConfig {
            default_sort: "id".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PaginationConfig {
            default_sort: "last_name:DESC".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
