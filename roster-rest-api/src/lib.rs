//! # Roster REST API
//!
//! HTTP endpoints for the people, comments and votes of a Roster service.
//! List endpoints accept `limit`, `offset` and `sort=attribute:asc|desc` and
//! answer with `next` / `previous` page links; filter endpoints take an
//! attribute expression such as `first_nameOrlast_name` in the path.
//!
//! ## Architecture
//!
//! Handlers receive an [`AppContext`] holding an `Arc<dyn RepositoryFactory>`,
//! so any storage backend implementing `roster-interfaces` can serve the API.
//!
//! ## Example
//!
//! ```rust,no_run
//! use roster_rest_api::{create_rest_app, AppConfig, AppContext};
//! use std::sync::Arc;
//!
//! # async fn example(repositories: Arc<dyn roster_interfaces::RepositoryFactory>) -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_rest_app(AppContext::new(repositories), AppConfig::default());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod models;

// Re-export commonly used types
pub use app::{create_rest_app, AppConfig, AppContext};
pub use errors::{RestError, RestResult};
pub use models::*;
