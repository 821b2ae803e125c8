//! Answer chain with a single entry point.
//!
//! Public API: [`RagChain::answer`]. It retrieves top-K context through a
//! [`Retriever`], fills the fixed prompt template, calls the hosted model
//! through a [`TextGenerator`] and trims the completion to the span between
//! the `"Question:"` and `"Thanks for asking!"` markers.

pub mod cfg;
mod error;
pub mod extract;
pub mod prompt;

use std::sync::Arc;

use ai_llm_service::TextGenerator;
use rag_store::Retriever;
use tracing::{debug, info};

pub use cfg::ContextorConfig;
pub use error::ContextorError;
pub use extract::{MarkerCase, extract_answer};

/// Retrieval + generation pipeline, shared read-only across requests.
#[derive(Clone)]
pub struct RagChain {
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn TextGenerator>,
    cfg: ContextorConfig,
}

impl RagChain {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        generator: Arc<dyn TextGenerator>,
        cfg: ContextorConfig,
    ) -> Self {
        Self {
            retriever,
            generator,
            cfg,
        }
    }

    pub fn config(&self) -> &ContextorConfig {
        &self.cfg
    }

    /// Answers `question` from the indexed document.
    ///
    /// # Errors
    /// Propagates retrieval, embedding and generation failures.
    ///
    /// # Example
    /// ```no_run
    /// # async fn run(chain: contextor::RagChain) -> Result<(), contextor::ContextorError> {
    /// let answer = chain.answer("What is computer vision?").await?;
    /// println!("{answer}");
    /// # Ok(()) }
    /// ```
    pub async fn answer(&self, question: &str) -> Result<String, ContextorError> {
        let hits = self.retriever.retrieve(question).await?;
        debug!(hits = hits.len(), "context retrieved");

        let context = prompt::join_context(&hits);
        let full_prompt = prompt::build_prompt(&context, question);

        let raw = self.generator.generate(&full_prompt).await?;
        let answer = extract_answer(&raw, self.cfg.marker_case).to_string();
        info!(
            raw_chars = raw.len(),
            answer_chars = answer.len(),
            "answer generated"
        );
        Ok(answer)
    }
}
