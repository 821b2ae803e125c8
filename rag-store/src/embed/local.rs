//! Local embedding provider: a sentence-transformers model run through ONNX.
//!
//! Model files are fetched from the public Hugging Face hub on first use and
//! cached on disk; no API token is sent or needed.

use std::{
    future::Future,
    path::PathBuf,
    pin::Pin,
    sync::{Arc, Mutex},
    time::Instant,
};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{debug, info};

use crate::{EmbeddingsProvider, RagError};

/// Model id reported for the default local model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-mpnet-base-v2";

/// Wraps `fastembed::TextEmbedding`.
///
/// `TextEmbedding::embed` needs `&mut self`, so the model sits behind a
/// `Mutex` and every call runs on the blocking pool.
#[derive(Clone)]
pub struct LocalEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
    name: &'static str,
}

impl std::fmt::Debug for LocalEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalEmbedder").field("model", &self.name).finish()
    }
}

impl LocalEmbedder {
    /// Loads all-mpnet-base-v2 (768 dims), downloading it into `cache_dir`
    /// (or fastembed's default cache) if needed.
    ///
    /// Blocking: call from [`LocalEmbedder::load`] inside async code.
    ///
    /// # Errors
    /// `RagError::Embedding` if the model cannot be fetched or initialized.
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self, RagError> {
        let started = Instant::now();
        let mut opts =
            InitOptions::new(EmbeddingModel::AllMpnetBaseV2).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            opts = opts.with_cache_dir(dir);
        }

        let model = TextEmbedding::try_new(opts)
            .map_err(|e| RagError::Embedding(format!("failed to load {DEFAULT_EMBEDDING_MODEL}: {e}")))?;

        info!(
            model = DEFAULT_EMBEDDING_MODEL,
            latency_ms = started.elapsed().as_millis(),
            "local embedding model loaded"
        );
        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            name: DEFAULT_EMBEDDING_MODEL,
        })
    }

    /// [`LocalEmbedder::new`] on the blocking pool.
    ///
    /// # Errors
    /// Same as [`LocalEmbedder::new`].
    pub async fn load(cache_dir: Option<PathBuf>) -> Result<Self, RagError> {
        tokio::task::spawn_blocking(move || Self::new(cache_dir))
            .await
            .map_err(|e| RagError::Embedding(format!("model loader task failed: {e}")))?
    }

    /// Model id, for status reporting.
    pub fn model_name(&self) -> &'static str {
        self.name
    }
}

impl EmbeddingsProvider for LocalEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>> {
        let model = Arc::clone(&self.model);
        let input = text.to_string();
        Box::pin(async move {
            let mut vectors = tokio::task::spawn_blocking(move || {
                let mut guard = model
                    .lock()
                    .map_err(|_| RagError::Embedding("embedding model lock poisoned".into()))?;
                guard
                    .embed(vec![input], None)
                    .map_err(|e| RagError::Embedding(e.to_string()))
            })
            .await
            .map_err(|e| RagError::Embedding(format!("embedding task failed: {e}")))??;

            debug!(chars = text.len(), "local embedding computed");
            if vectors.is_empty() {
                return Err(RagError::Embedding("model returned no vector".into()));
            }
            Ok(vectors.swap_remove(0))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "downloads the embedding model"]
    async fn embeds_with_the_default_model() {
        let embedder = LocalEmbedder::load(None).await.unwrap();
        let v = embedder.embed("computer vision").await.unwrap();
        assert_eq!(v.len(), 768);
        assert_eq!(embedder.model_name(), DEFAULT_EMBEDDING_MODEL);
    }
}
