//! GET /health: liveness plus a summary of the loaded index.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub source: String,
    pub chunks: usize,
    pub model: String,
    pub embedding_model: String,
}

pub async fn health_route(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let info = &state.info;
    Json(HealthResponse {
        status: "ok",
        source: info.source.clone(),
        chunks: info.chunks,
        model: info.model.clone(),
        embedding_model: info.embedding_model.clone(),
    })
}
