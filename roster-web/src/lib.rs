//! # Roster Web Utilities
//!
//! Web plumbing shared by the Roster REST API: error responses, list query
//! extraction, CORS and request-id middleware, and the JSON envelopes used by
//! list and detail endpoints.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use roster_web::{
//!     extractors::ListParams,
//!     middleware::{cors_layer, request_id_middleware},
//! };
//!
//! async fn list_items(ListParams(query): ListParams) -> String {
//!     format!("limit={:?}", query.limit)
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let app: Router = Router::new()
//!     .route("/items", get(list_items))
//!     .layer(middleware::from_fn(request_id_middleware))
//!     .layer(cors_layer());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod utils;

// Re-export commonly used types and functions
pub use errors::{WebError, WebResult};
pub use extractors::{FilterPath, IdPath, JsonBody, ListDefaults, ListParams, ListQuery};
pub use middleware::{cors_layer, cors_layer_with_config, error_handler_middleware, request_id_middleware, CorsConfig};
pub use utils::{Envelope, PageResponse};
