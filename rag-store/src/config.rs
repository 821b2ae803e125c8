//! Runtime configuration for ingestion and retrieval.

use std::{fmt, path::PathBuf, str::FromStr};

use crate::errors::RagError;

/// Page indexed when `RAG_SOURCE_URL` is not set.
pub const DEFAULT_SOURCE_URL: &str = "https://www.ibm.com/topics/computer-vision";
pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_CHUNK_OVERLAP: usize = 0;
pub const DEFAULT_TOP_K: u64 = 4;
pub const DEFAULT_EMBEDDING_CONCURRENCY: usize = 4;

/// Similarity function used by the in-memory index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceKind {
    /// Cosine similarity (higher is closer).
    Cosine,
    /// Raw dot product (for vectors already normalized by the model).
    Dot,
}

impl FromStr for DistanceKind {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "dot" => Ok(Self::Dot),
            other => Err(RagError::Config(format!(
                "RAG_DISTANCE must be `cosine` or `dot`, got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for DistanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cosine => "cosine",
            Self::Dot => "dot",
        })
    }
}

/// Configuration for RAG ingestion and retrieval.
#[derive(Clone, Debug, PartialEq)]
pub struct RagConfig {
    /// Document fetched once at startup.
    pub source_url: String,
    /// Maximum chunk length, in characters.
    pub chunk_size: usize,
    /// Characters carried over from the previous chunk.
    pub chunk_overlap: usize,
    /// Number of hits returned per query.
    pub top_k: u64,
    /// Similarity function.
    pub distance: DistanceKind,
    /// Enforced vector size; `None` accepts whatever the first vector has.
    pub embedding_dim: Option<usize>,
    /// Maximum concurrent embedding calls while indexing.
    pub embedding_concurrency: usize,
    /// Where the local embedding model is cached; `None` uses the model's default.
    pub embedding_cache_dir: Option<PathBuf>,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
            distance: DistanceKind::Cosine,
            embedding_dim: None,
            embedding_concurrency: DEFAULT_EMBEDDING_CONCURRENCY,
            embedding_cache_dir: None,
        }
    }
}

impl RagConfig {
    /// Build from environment variables, falling back to defaults.
    ///
    /// Reads `RAG_SOURCE_URL`, `RAG_CHUNK_SIZE`, `RAG_CHUNK_OVERLAP`,
    /// `RAG_TOP_K`, `RAG_DISTANCE`, `EMBEDDING_DIM`, `EMBEDDING_CONCURRENCY`,
    /// `EMBEDDING_CACHE_DIR`.
    ///
    /// # Errors
    /// Returns `RagError::Config` when a value does not parse or fails [`RagConfig::validate`].
    pub fn from_env() -> Result<Self, RagError> {
        let d = Self::default();
        let cfg = Self {
            source_url: env("RAG_SOURCE_URL").unwrap_or(d.source_url),
            chunk_size: parse("RAG_CHUNK_SIZE", d.chunk_size)?,
            chunk_overlap: parse("RAG_CHUNK_OVERLAP", d.chunk_overlap)?,
            top_k: parse("RAG_TOP_K", d.top_k)?,
            distance: match env("RAG_DISTANCE") {
                Some(v) => v.parse()?,
                None => d.distance,
            },
            embedding_dim: match env("EMBEDDING_DIM") {
                Some(_) => Some(parse("EMBEDDING_DIM", 0usize)?),
                None => None,
            },
            embedding_concurrency: parse("EMBEDDING_CONCURRENCY", d.embedding_concurrency)?,
            embedding_cache_dir: env("EMBEDDING_CACHE_DIR").map(PathBuf::from),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        let url = self.source_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RagError::Config(
                "source_url must start with http:// or https://".into(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be > 0".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("top_k must be > 0".into()));
        }
        if self.embedding_dim == Some(0) {
            return Err(RagError::Config("embedding_dim must be > 0".into()));
        }
        if self.embedding_concurrency == 0 {
            return Err(RagError::Config("embedding_concurrency must be > 0".into()));
        }
        Ok(())
    }
}

fn env(k: &str) -> Option<String> {
    std::env::var(k)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse<T: FromStr>(k: &str, dflt: T) -> Result<T, RagError> {
    match env(k) {
        Some(v) => v
            .parse()
            .map_err(|_| RagError::Config(format!("{k} has an invalid value: {v:?}"))),
        None => Ok(dflt),
    }
}
