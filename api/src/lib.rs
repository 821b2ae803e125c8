//! HTTP surface of the RAG service.
//!
//! `start()` builds the index once, then serves `POST /query` and
//! `GET /health` until Ctrl+C.

use std::sync::Arc;

pub mod core;
pub mod error_handler;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

pub use crate::{
    core::{
        app_config::AppConfig,
        app_state::{AppState, IndexInfo},
    },
    error_handler::AppError,
};
use crate::routes::{health_route::health_route, query::query_route::query_route};

/// Loads config, indexes the source page and serves requests.
///
/// # Errors
/// Any startup failure (config, fetch, embedding, bind) or a server I/O error.
pub async fn start() -> Result<(), AppError> {
    let cfg = AppConfig::from_env();
    let state = Arc::new(AppState::from_env().await?);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&cfg.api_address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %cfg.api_address, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Routes over a ready state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/query", post(query_route))
        .route("/health", get(health_route))
        .with_state(state)
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
