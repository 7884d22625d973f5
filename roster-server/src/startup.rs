//! Server startup and shutdown logic

use anyhow::Result;
use axum::Router;
use roster_config::RosterConfig;
use roster_interfaces::RepositoryFactory;
use roster_rest_api::{create_rest_app, AppConfig, AppContext};
use roster_storage::InMemoryRepositoryFactory;
use roster_web::ListDefaults;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Server application struct
pub struct Server {
    config: RosterConfig,
    repositories: Arc<dyn RepositoryFactory>,
}

impl Server {
    /// Initialise logging, create the in-memory storage and load the startup seed
    pub async fn new(config: RosterConfig) -> Result<Self> {
        roster_logging::init_logging_from_config(&config.logging)?;

        let server = Self::with_repositories(config, Arc::new(InMemoryRepositoryFactory::default()));
        server.seed().await?;
        Ok(server)
    }

    /// Server over an existing storage backend; nothing is seeded
    pub fn with_repositories(config: RosterConfig, repositories: Arc<dyn RepositoryFactory>) -> Self {
        Self { config, repositories }
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    async fn seed(&self) -> Result<()> {
        let quantity = self.config.seed.quantity;
        if quantity == 0 {
            return Ok(());
        }

        let report = self.repositories.seed(quantity).await?;
        tracing::debug!(?report, "Startup seed finished");
        Ok(())
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        let context = AppContext::new(self.repositories.clone())
            .with_list_defaults(ListDefaults {
                limit: self.config.pagination.default_limit,
                sort: self.config.pagination.default_sort.clone(),
            })
            .with_filter_cache_size(self.config.cache.filter_cache_size);

        let app_config = AppConfig {
            api_prefix: self.config.server.api_prefix.clone(),
            cors: web_cors_config(&self.config.server.cors),
            ..AppConfig::default()
        };

        create_rest_app(context, app_config)
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM
    pub async fn start(self) -> Result<()> {
        let addr = self.config.server.socket_address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.log_config_summary();
        tracing::info!("Server listening on {}", listener.local_addr()?);

        let app = self.build_app();
        axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    fn log_config_summary(&self) {
        let config = &self.config;
        tracing::info!(
            bind = %config.server.socket_address(),
            api_prefix = %config.server.api_prefix,
            origins = ?config.server.cors.allowed_origins,
            default_limit = config.pagination.default_limit,
            default_sort = %config.pagination.default_sort,
            filter_cache = config.cache.filter_cache_size,
            "Roster server configuration"
        );
    }
}

/// Translate the configured CORS settings into the middleware's form
pub fn web_cors_config(cors: &roster_config::CorsConfig) -> roster_web::CorsConfig {
    roster_web::CorsConfig {
        allowed_origins: cors.allowed_origins.clone(),
        allowed_methods: cors.allowed_methods.clone(),
        allowed_headers: cors.allowed_headers.clone(),
        allow_credentials: cors.allow_credentials,
        max_age_secs: cors.max_age_secs,
        ..roster_web::CorsConfig::default()
    }
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
