//! POST /query: answers a question from the indexed page.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{debug, info};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::query::query_request::{QueryRequest, QueryResponse},
};

/// Handler: POST /query
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/query \
///   -H 'content-type: application/json' \
///   -d '{"query":"What is computer vision?"}'
/// ```
pub async fn query_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> AppResult<Json<QueryResponse>> {
    let Json(body) = payload?;
    info!(query = %body.query, "received query");

    let response = state.chain.answer(&body.query).await?;
    debug!(chars = response.len(), "query_route: success");

    Ok(Json(QueryResponse { response }))
}
