//! Retrieval: brute-force similarity search and the `Retriever` seam.

use std::{future::Future, pin::Pin, sync::Arc};

use tracing::trace;

use crate::{
    RagStore,
    config::DistanceKind,
    embed::EmbeddingsProvider,
    errors::RagError,
    record::{RagHit, RagQuery, RagRecord},
};

/// Anything that returns ranked context for a question.
///
/// The answer chain holds an `Arc<dyn Retriever>`, so tests can hand it a
/// canned list of hits without touching the network.
pub trait Retriever: Send + Sync {
    fn retrieve<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RagHit>, RagError>> + Send + 'a>>;
}

/// Production retriever: the startup index plus the embedder used to build it.
#[derive(Clone)]
pub struct IndexedRetriever {
    store: Arc<RagStore>,
    provider: Arc<dyn EmbeddingsProvider>,
}

impl IndexedRetriever {
    pub fn new(store: Arc<RagStore>, provider: Arc<dyn EmbeddingsProvider>) -> Self {
        Self { store, provider }
    }

    pub fn store(&self) -> &RagStore {
        &self.store
    }
}

impl Retriever for IndexedRetriever {
    fn retrieve<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RagHit>, RagError>> + Send + 'a>> {
        Box::pin(async move {
            let query = RagQuery {
                text,
                top_k: self.store.config().top_k,
            };
            self.store.rag_context(query, self.provider.as_ref()).await
        })
    }
}

/// Scores every record against `query_vector` and keeps the best `top_k`.
///
/// Ties keep insertion (document) order.
///
/// # Errors
/// `RagError::VectorSizeMismatch` if the query vector has the wrong size.
pub fn search_by_vector(
    records: &[RagRecord],
    dim: usize,
    distance: DistanceKind,
    query_vector: &[f32],
    top_k: u64,
) -> Result<Vec<RagHit>, RagError> {
    if query_vector.len() != dim {
        return Err(RagError::VectorSizeMismatch {
            got: query_vector.len(),
            want: dim,
        });
    }

    let mut scored: Vec<(f32, &RagRecord)> = records
        .iter()
        .filter_map(|r| {
            r.embedding
                .as_deref()
                .map(|v| (similarity(distance, query_vector, v), r))
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let k = usize::try_from(top_k).unwrap_or(usize::MAX);
    let hits: Vec<RagHit> = scored
        .into_iter()
        .take(k)
        .map(|(score, r)| RagHit {
            score,
            id: r.id.clone(),
            text: r.text.clone(),
            source: r.source.clone(),
        })
        .collect();

    trace!("retrieve::search_by_vector top_k={top_k} hits={}", hits.len());
    Ok(hits)
}

fn similarity(kind: DistanceKind, a: &[f32], b: &[f32]) -> f32 {
    match kind {
        DistanceKind::Cosine => cosine(a, b),
        DistanceKind::Dot => a.iter().zip(b).map(|(x, y)| x * y).sum(),
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut na, mut nb) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na.sqrt() * nb.sqrt())
    }
}
