//! Main application configuration and router setup

use axum::{middleware, routing::get, Router};
use roster_web::{
    cors_layer_with_config, error_handler_middleware, middleware::handle_not_found, request_id_middleware,
    CorsConfig,
};
use tower_http::trace::TraceLayer;

use crate::handlers;

pub use crate::context::AppContext;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable CORS middleware
    pub enable_cors: bool,
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// API path prefix; empty mounts the resources at the root
    pub api_prefix: String,
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            enable_request_id: true,
            enable_tracing: true,
            api_prefix: "/api/v1".to_string(),
            cors: CorsConfig::default(),
        }
    }
}

/// Create the complete REST API application
pub fn create_rest_app(mut context: AppContext, config: AppConfig) -> Router {
    let prefix = config.api_prefix.trim_end_matches('/').to_string();
    context.api_prefix = prefix.clone();

    let service_routes = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/data", get(handlers::load_fake_data));

    let app = if prefix.is_empty() {
        service_routes.merge(create_api_router())
    } else {
        service_routes.nest(&prefix, create_api_router())
    };

    let mut app = app
        .fallback(handle_not_found)
        .with_state(context)
        .layer(middleware::from_fn(error_handler_middleware));

    // Layers added last run first
    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    if config.enable_request_id {
        app = app.layer(middleware::from_fn(request_id_middleware));
    }

    if config.enable_cors {
        app = app.layer(cors_layer_with_config(config.cors));
    }

    app
}

/// Resource routes, mounted under the API prefix
fn create_api_router() -> Router<AppContext> {
    Router::new()
        // Users
        .route("/users", get(handlers::list_users).post(handlers::create_user))
        .route("/users/filter/{attribute}/{value}", get(handlers::filter_users))
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .patch(handlers::patch_user)
                .put(handlers::replace_user)
                .delete(handlers::delete_user),
        )
        // Comments
        .route("/comments", get(handlers::list_comments).post(handlers::create_comment))
        .route("/comments/filter/{attribute}/{value}", get(handlers::filter_comments))
        .route("/comments/user/{user_id}", get(handlers::list_user_comments))
        .route(
            "/comments/{id}",
            get(handlers::get_comment)
                .patch(handlers::patch_comment)
                .put(handlers::replace_comment)
                .delete(handlers::delete_comment),
        )
        // Votes
        .route("/votes", get(handlers::list_votes).post(handlers::create_vote))
        .route("/votes/comment/{comment_id}", get(handlers::comment_votes))
        .route("/votes/{id}", get(handlers::get_vote).delete(handlers::delete_vote))
}
