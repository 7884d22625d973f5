//! Fake data loaded at startup

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Upper bound on records generated at once
pub const MAX_SEED_QUANTITY: usize = 10_000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// People (and as many comments and votes) generated before serving; 0 disables
    pub quantity: usize,
}

impl Validatable for SeedConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.quantity > MAX_SEED_QUANTITY {
            return Err(self.validation_error(format!(
                "quantity must be at most {}, got {}",
                MAX_SEED_QUANTITY, self.quantity
            )));
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "seed"
    }
}
