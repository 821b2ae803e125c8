//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Network failure while fetching the source document.
    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Source document answered with a non-success status.
    #[error("fetch of {url} returned HTTP {status}")]
    HttpStatus { status: u16, url: String },

    /// Page body could not be turned into text.
    #[error("content extraction failed: {0}")]
    Extract(String),

    /// Local embedding model failed to load or to embed.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Mismatch in vector dimensionality across records.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// A record reached the index without a vector.
    #[error("record {0} has no embedding")]
    MissingEmbedding(String),

    /// Nothing to index: the source produced no chunks.
    #[error("source produced no chunks to index")]
    EmptyIndex,
}
