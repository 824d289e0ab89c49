//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the optimize handler
//! - Wire up middleware (tracing, request ID, body limit, panic catching)
//! - Bind server to listener and shut down gracefully

use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::error::{handle_panic, method_not_allowed, no_route};
use crate::http::optimize::{optimize_route, OPTIMIZE_PATH};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::optimizer::{OptimizerClient, OptimizerError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub optimizer: Arc<OptimizerClient>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, OptimizerError> {
        let optimizer = Arc::new(OptimizerClient::new(&config.optimizer)?);
        let state = AppState { optimizer };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Unknown paths and methods go through the same 500 mapping as
    /// handler failures.
    pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let routes = Router::new()
            .route(OPTIMIZE_PATH, post(optimize_route))
            .fallback(no_route)
            .method_not_allowed_fallback(method_not_allowed)
            .with_state(state);
        Self::with_layers(config, routes)
    }

    /// Wrap routes in the production middleware stack.
    ///
    /// Layers added last run first: request IDs are assigned before the
    /// trace span opens, and panics are caught closest to the handler.
    pub fn with_layers(config: &GatewayConfig, routes: Router) -> Router {
        routes
            .layer(DefaultBodyLimit::max(config.listener.max_body_size))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            optimizer = %self.config.optimizer.endpoint(),
            "HTTP server starting"
        );

        if self.config.optimizer.timeout_secs.is_none() {
            tracing::warn!(
                "No optimizer timeout configured; a hung optimizer holds requests open indefinitely"
            );
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
