use axum::http::{HeaderName, HeaderValue, Method};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};

const WILDCARD: &str = "*";

/// CORS configuration.
///
/// The defaults are the public API settings: any origin, the five methods
/// the API serves and any request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins, `["*"]` for any origin
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    /// Allowed request headers, `["*"]` for any header
    pub allowed_headers: Vec<String>,
    pub expose_headers: Vec<String>,
    /// Cannot be combined with a wildcard origin
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds
    pub max_age_secs: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![WILDCARD.to_string()],
            allowed_methods: ["GET", "POST", "PATCH", "PUT", "DELETE"]
                .iter()
                .map(|method| method.to_string())
                .collect(),
            allowed_headers: vec![WILDCARD.to_string()],
            expose_headers: vec!["x-request-id".to_string()],
            allow_credentials: false,
            max_age_secs: Some(3600),
        }
    }
}

impl CorsConfig {
    /// Restrict the API to an explicit origin list; credentials become allowed
    pub fn restricted(allowed_origins: Vec<String>) -> Self {
        Self {
            allowed_origins,
            allow_credentials: true,
            ..Default::default()
        }
    }

    fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == WILDCARD)
    }

    fn allows_any_header(&self) -> bool {
        self.allowed_headers.iter().any(|header| header == WILDCARD)
    }

    /// Reject combinations browsers refuse to honour
    pub fn validate(&self) -> Result<(), String> {
        if self.allows_any_origin() && self.allow_credentials {
            return Err("Cannot use wildcard origin '*' with allow_credentials: true".to_string());
        }
        if self.allows_any_header() && self.allow_credentials {
            return Err("Cannot use wildcard header '*' with allow_credentials: true".to_string());
        }

        for method in &self.allowed_methods {
            method
                .parse::<Method>()
                .map_err(|_| format!("Invalid CORS method '{}'", method))?;
        }

        if !self.allows_any_origin() {
            for origin in &self.allowed_origins {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|_| format!("Invalid CORS origin '{}'", origin))?;
            }
        }

        Ok(())
    }
}

/// CORS layer with the default configuration
pub fn cors_layer() -> CorsLayer {
    cors_layer_with_config(CorsConfig::default())
}

/// CORS layer for `config`; an invalid configuration falls back to the defaults
pub fn cors_layer_with_config(config: CorsConfig) -> CorsLayer {
    if let Err(e) = config.validate() {
        tracing::error!("Invalid CORS configuration: {}, falling back to defaults", e);
        return cors_layer_with_config(CorsConfig::default());
    }

    let origins = if config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|method| method.parse().ok())
        .collect();

    let headers = if config.allows_any_header() {
        AllowHeaders::from(Any)
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|header| header.parse().ok())
            .collect();
        AllowHeaders::list(headers)
    };

    let expose_headers: Vec<HeaderName> = config
        .expose_headers
        .iter()
        .filter_map(|header| header.parse().ok())
        .collect();

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .expose_headers(expose_headers);

    if config.allow_credentials {
        cors = cors.allow_credentials(true);
    }

    if let Some(max_age) = config.max_age_secs {
        cors = cors.max_age(Duration::from_secs(max_age));
    }

    cors
}
