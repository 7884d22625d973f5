//! Health check endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::time::Instant;
use tracing::{debug, error};

use crate::{
    context::AppContext,
    models::{HealthCheckResult, HealthResponse, HealthStatus},
};

/// Health of the API and its storage; 503 when storage fails its check
pub async fn health_check(State(ctx): State<AppContext>) -> impl IntoResponse {
    debug!("Health check requested");

    let started = Instant::now();
    let storage = match ctx.repositories.health_check().await {
        Ok(()) => HealthCheckResult {
            status: HealthStatus::Healthy,
            message: None,
            duration_ms: started.elapsed().as_millis() as u64,
        },
        Err(e) => {
            error!("Storage health check failed: {}", e);
            HealthCheckResult {
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
                duration_ms: started.elapsed().as_millis() as u64,
            }
        }
    };

    let response = HealthResponse::healthy().with_check("storage", storage);
    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
