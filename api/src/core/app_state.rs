use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use contextor::{ContextorConfig, RagChain};
use rag_store::{IndexedRetriever, LocalEmbedder, RagConfig, RagStore};
use tracing::info;

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Answer chain over the startup index.
    pub chain: Arc<RagChain>,
    /// What `/health` reports.
    pub info: IndexInfo,
}

/// Static facts about the loaded index and models.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexInfo {
    pub source: String,
    pub chunks: usize,
    pub model: String,
    pub embedding_model: String,
}

impl AppState {
    /// Loads every config layer from the environment, loads the local
    /// embedding model, fetches and indexes the source page, and wires the
    /// answer chain. The inference token is only used later, by generation.
    ///
    /// # Errors
    /// `AppError::Config` for invalid settings, `AppError::Startup` when
    /// loading the model, fetching or embedding the source page fails.
    pub async fn from_env() -> Result<Self, AppError> {
        let profiles = Arc::new(
            LlmServiceProfiles::from_env().map_err(|e| AppError::Config(e.to_string()))?,
        );
        let rag_cfg = RagConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;
        let chain_cfg = ContextorConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;

        let model = profiles.generation().model.clone();

        let embedder = Arc::new(LocalEmbedder::load(rag_cfg.embedding_cache_dir.clone()).await?);
        let embedding_model = embedder.model_name().to_string();

        info!(source = %rag_cfg.source_url, "indexing source document");
        let store = Arc::new(RagStore::ingest_url(rag_cfg, embedder.as_ref()).await?);

        let info = IndexInfo {
            source: store.config().source_url.clone(),
            chunks: store.len(),
            model,
            embedding_model,
        };
        info!(chunks = info.chunks, model = %info.model, "index ready");

        let retriever = Arc::new(IndexedRetriever::new(store, embedder));
        let chain = RagChain::new(retriever, profiles, chain_cfg);

        Ok(Self::new(chain, info))
    }

    pub fn new(chain: RagChain, info: IndexInfo) -> Self {
        Self {
            chain: Arc::new(chain),
            info,
        }
    }
}
