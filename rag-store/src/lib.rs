//! In-memory RAG index: ingestion + retrieval.
//!
//! This crate provides a small API to:
//! - Fetch one web page, extract its readable text and split it into chunks
//! - Embed the chunks once with a local model and keep them in memory
//! - Retrieve top‑K context (RAG) for a textual query
//!
//! The index is built once and never mutated afterwards, so a `RagStore`
//! can be shared behind an `Arc` without locking.

mod config;
mod embed;
mod embed_pool;
mod errors;
pub mod ingest;
mod record;
mod retrieve;
#[cfg(test)]
mod test_http;

pub use config::{
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_SOURCE_URL, DEFAULT_TOP_K, DistanceKind,
    RagConfig,
};
pub use embed::{
    EmbeddingsProvider,
    local::{DEFAULT_EMBEDDING_MODEL, LocalEmbedder},
};
pub use errors::RagError;
pub use record::{RagHit, RagQuery, RagRecord};
pub use retrieve::{IndexedRetriever, Retriever};

use tracing::{info, trace};

use crate::ingest::web_loader::WebPageLoader;

/// Immutable vector index over the chunks of one source document.
#[derive(Debug)]
pub struct RagStore {
    cfg: RagConfig,
    records: Vec<RagRecord>,
    dim: usize,
}

impl RagStore {
    /// Embeds every record that has no vector yet and freezes the index.
    ///
    /// # Errors
    /// `RagError::EmptyIndex` for an empty input, embedding errors, or
    /// `RagError::VectorSizeMismatch` for inconsistent vectors.
    pub async fn build(
        cfg: RagConfig,
        mut records: Vec<RagRecord>,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Self, RagError> {
        cfg.validate()?;
        if records.is_empty() {
            return Err(RagError::EmptyIndex);
        }

        let dim = embed_pool::embed_missing(
            &mut records,
            provider,
            cfg.embedding_dim,
            cfg.embedding_concurrency,
        )
        .await?;

        info!(records = records.len(), dim, "RagStore built");
        Ok(Self { cfg, records, dim })
    }

    /// Fetches `cfg.source_url`, splits it and builds the index.
    ///
    /// This is the whole startup ingestion path; it runs once per process.
    ///
    /// # Errors
    /// Fetch, configuration and embedding errors.
    pub async fn ingest_url(
        cfg: RagConfig,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Self, RagError> {
        cfg.validate()?;
        let loader = WebPageLoader::new()?;
        let doc = loader.load(&cfg.source_url).await?;
        let records = ingest::chunk_document(&cfg, &doc)?;
        Self::build(cfg, records, provider).await
    }

    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    pub fn records(&self) -> &[RagRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Vector size shared by all records.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Performs a similarity search with a ready query vector.
    ///
    /// # Errors
    /// Returns `RagError::VectorSizeMismatch` if the vector has the wrong size.
    pub fn search_by_vector(
        &self,
        query_vector: &[f32],
        top_k: u64,
    ) -> Result<Vec<RagHit>, RagError> {
        retrieve::search_by_vector(
            &self.records,
            self.dim,
            self.cfg.distance,
            query_vector,
            top_k,
        )
    }

    /// Builds RAG context for a textual query using the provided embedding provider.
    ///
    /// # Errors
    /// Returns embedding errors or a size mismatch.
    pub async fn rag_context(
        &self,
        query: RagQuery<'_>,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Vec<RagHit>, RagError> {
        trace!("RagStore::rag_context top_k={}", query.top_k);
        let qv = provider.embed(query.text).await?;
        self.search_by_vector(&qv, query.top_k)
    }
}
