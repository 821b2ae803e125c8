//! Core data models used by the library.

/// One chunk of the source document, as stored in the index.
#[derive(Clone, Debug, PartialEq)]
pub struct RagRecord {
    pub id: String,
    pub text: String,
    pub source: Option<String>,
    pub embedding: Option<Vec<f32>>,
}

impl RagRecord {
    /// New record without a vector; `embed_pool` fills it later.
    pub fn new(id: impl Into<String>, text: impl Into<String>, source: Option<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            source,
            embedding: None,
        }
    }
}

/// Query parameters for RAG retrieval.
pub struct RagQuery<'a> {
    pub text: &'a str,
    pub top_k: u64,
}

/// A single retrieval hit with score, text and source.
#[derive(Clone, Debug)]
pub struct RagHit {
    pub score: f32,
    pub id: String,
    pub text: String,
    pub source: Option<String>,
}
