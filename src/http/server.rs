//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with the relay route and static fallback
//! - Wire up middleware (tracing, request ID)
//! - Hold the shared outbound client
//! - Serve with graceful shutdown

use axum::{http::HeaderName, routing::any, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::relay::relay_handler;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::http::static_files::static_handler;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub client: reqwest::Client,
}

/// HTTP server for the relay service.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        // Outbound client: transport-default timeouts, redirects relayed
        // to the caller instead of followed
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build outbound HTTP client");

        let state = AppState {
            config: Arc::new(config.clone()),
            client,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let x_request_id = HeaderName::from_static(X_REQUEST_ID);

        Router::new()
            .route("/proxy", any(relay_handler))
            .route("/proxy/{*suffix}", any(relay_handler))
            .fallback(static_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, UuidRequestId))
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
