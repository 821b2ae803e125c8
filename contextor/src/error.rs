//! Typed error for the contextor crate.

use thiserror::Error;

/// Everything that can fail while answering a question.
///
/// Upstream errors are transparent so their text reaches the caller as is.
#[derive(Debug, Error)]
pub enum ContextorError {
    /// Retrieval failed (query embedding or index search).
    #[error(transparent)]
    Rag(#[from] rag_store::RagError),

    /// The hosted model call failed.
    #[error(transparent)]
    Llm(#[from] ai_llm_service::AiLlmError),

    #[error("config error: {0}")]
    Config(String),
}
