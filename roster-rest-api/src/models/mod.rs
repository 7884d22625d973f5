pub mod common;

pub use common::{
    DataLoadedResponse, HealthCheckResult, HealthResponse, HealthStatus, IndexResponse, SeedQuery,
    MAX_SEED_QUANTITY,
};
