//! Advisory HTTP server
//!
//! Wires the advisor into an axum router and runs it until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::core::Advisor;
use crate::error::{AdvisoryError, AdvisoryResult};
use crate::traits::{AdvisoryStore, PredictionClient};
use crate::web::handlers;

/// HTTP server around an advisor with injected collaborators
pub struct AdvisoryServer<P, S>
where
    P: PredictionClient + 'static,
    S: AdvisoryStore + 'static,
{
    advisor: Arc<Advisor<P, S>>,
}

impl<P, S> AdvisoryServer<P, S>
where
    P: PredictionClient + 'static,
    S: AdvisoryStore + 'static,
{
    /// Create a server around the given advisor
    pub fn new(advisor: Advisor<P, S>) -> Self {
        Self {
            advisor: Arc::new(advisor),
        }
    }

    /// Build the axum router with all routes.
    ///
    /// CORS is permissive: the original deployment serves a browser frontend
    /// from a different origin.
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/api/advisory/crop", post(handlers::recommend_crop::<P, S>))
            .route("/api/advisory/fertilizer", post(handlers::recommend_fertilizer::<P, S>))
            .route("/api/advisory/history/:farmer_uid", get(handlers::history::<P, S>))
            .route("/api/status", get(handlers::status::<P, S>))
            .route("/health", get(handlers::health))
            .layer(ServiceBuilder::new().layer(CorsLayer::permissive()).into_inner())
            .with_state(self.advisor.clone())
    }

    /// Serve requests until the listener fails or Ctrl+C arrives
    pub async fn run(&self, addr: SocketAddr) -> AdvisoryResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AdvisoryError::config(format!("failed to bind {addr}: {e}")))?;

        info!("advisory server listening on http://{}", listener.local_addr()?);

        tokio::select! {
            result = axum::serve(listener, router) => {
                result?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("received shutdown signal");
            }
        }

        Ok(())
    }
}
