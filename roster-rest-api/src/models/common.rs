//! Bodies of the service-level endpoints

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root document listing the API entry points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResponse {
    pub detail: String,
    pub apis: Vec<String>,
    pub fake_data: String,
    pub health: String,
}

impl IndexResponse {
    pub fn new(api_prefix: &str) -> Self {
        Self {
            detail: "Welcome to the Roster API".to_string(),
            apis: ["users", "comments", "votes"]
                .iter()
                .map(|resource| format!("{}/{}", api_prefix, resource))
                .collect(),
            fake_data: "/data".to_string(),
            health: "/health".to_string(),
        }
    }
}

/// Largest `quantity` accepted by the fake data loader
pub const MAX_SEED_QUANTITY: usize = 10_000;

/// `?quantity=` of the fake data loader
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeedQuery {
    #[serde(default)]
    pub quantity: usize,
}

/// Answer of the fake data loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLoadedResponse {
    pub success: bool,
    pub detail: String,
    pub home: String,
    pub people: usize,
    pub comments: usize,
    pub votes: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub checks: HashMap<String, HealthCheckResult>,
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks: HashMap::new(),
        }
    }

    /// Attach a dependency check; any unhealthy check makes the whole response unhealthy
    pub fn with_check(mut self, name: impl Into<String>, check: HealthCheckResult) -> Self {
        if check.status == HealthStatus::Unhealthy {
            self.status = HealthStatus::Unhealthy;
        }
        self.checks.insert(name.into(), check);
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
