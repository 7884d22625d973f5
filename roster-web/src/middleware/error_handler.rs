use axum::{
    http::{Method, Request, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::errors::WebError;

/// Log server errors on the way out; the response itself is untouched
pub async fn error_handler_middleware(request: Request<axum::body::Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() {
        error!(%method, %uri, status = status.as_u16(), "Server error occurred");
    }

    response
}

/// Fallback for unrouted paths
pub async fn handle_not_found(method: Method, uri: Uri) -> impl IntoResponse {
    warn!(%method, %uri, "No route matched");
    WebError::not_found(format!("The requested resource '{}' was not found", uri.path()))
}

/// Wrap any displayable failure as a 500
pub fn internal_error<E: std::fmt::Display>(err: E) -> WebError {
    WebError::internal(err.to_string())
}
