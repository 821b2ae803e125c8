use serde::{Deserialize, Serialize};

/// Request payload for `POST /query`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Natural language question.
    pub query: String,
}

/// Response payload for `POST /query`.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// Trimmed model answer.
    pub response: String,
}
