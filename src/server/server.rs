//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::core::audit::AuditLog;
use crate::core::gateway::ChatGateway;
use crate::core::providers::{
    FileContextProvider, HttpLlmBackend, StaticContextProvider, TrainingContextProvider,
};
use crate::core::ratelimit::RateLimiter;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer as ActixHttpServer};
use std::sync::Arc;
use tracing::{debug, info};

const CHAT_AUDIT_KEY: &str = "audit:chat";
const SECURITY_AUDIT_KEY: &str = "audit:security";

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Wire the pipeline from configuration and create the server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let store: Arc<dyn KeyValueStore> = match &config.gateway.storage.data_dir {
            Some(dir) => {
                info!("Persisting pipeline state under {}", dir);
                Arc::new(FileStore::new(dir).await?)
            }
            None => {
                debug!("No data_dir configured, pipeline state is in-memory");
                Arc::new(MemoryStore::new())
            }
        };

        let limiter = RateLimiter::new(Arc::clone(&store));
        limiter.start_cleanup_task(config.gateway.rate_limit.to_config());
        let chat_log = AuditLog::restore(
            config.gateway.audit.chat_capacity,
            Arc::clone(&store),
            CHAT_AUDIT_KEY,
        )
        .await;
        let security_log = AuditLog::restore(
            config.gateway.audit.security_capacity,
            Arc::clone(&store),
            SECURITY_AUDIT_KEY,
        )
        .await;

        let backend = Arc::new(HttpLlmBackend::new(&config.gateway.llm)?);
        let context_provider: Arc<dyn TrainingContextProvider> =
            match &config.gateway.context.snippets_file {
                Some(path) => Arc::new(FileContextProvider::new(path)),
                None => Arc::new(StaticContextProvider::default()),
            };

        let gateway = ChatGateway::new(
            limiter,
            chat_log,
            security_log,
            backend,
            context_provider,
            config.gateway.rate_limit.to_config(),
            config.gateway.llm.timeout(),
        );

        Ok(Self {
            config: config.gateway.server.clone(),
            state: AppState::new(config.clone(), gateway),
        })
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        info!("Starting HTTP server on {}", bind_addr);

        let allowed_origins = self.config.cors_allowed_origins.clone();
        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST"])
                .allow_any_header()
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }

            App::new()
                .app_data(state.clone())
                .wrap(cors)
                .wrap(Logger::default())
                .configure(routes::health::configure_routes)
                .configure(routes::chat::configure_routes)
                .configure(routes::audit::configure_routes)
        })
        .bind(&bind_addr)
        .map_err(|e| GatewayError::server(format!("Failed to bind {bind_addr}: {e}")))?
        .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {e}")))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
