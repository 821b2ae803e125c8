//! Shared LLM service holding the hosted `generation` profile.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Builds its HTTP client at construction time and makes no network call
//!   there, so a missing token only surfaces on the first generation.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::service_profiles::LlmServiceProfiles;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmServiceProfiles::from_env()?);
//!
//! let txt = svc.generate("What is computer vision?").await?;
//! println!("{txt}");
//! # Ok(()) }
//! ```

use std::{future::Future, pin::Pin};

use crate::{
    config::{default_config::config_hf_generation, llm_model_config::LlmModelConfig},
    error_handler::AiLlmError,
    services::hugging_face_service::HuggingFaceService,
    text_generator::TextGenerator,
};

/// Shared service that owns the **generation** client.
pub struct LlmServiceProfiles {
    generation: HuggingFaceService,
}

impl std::fmt::Debug for LlmServiceProfiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmServiceProfiles")
            .field("generation", &self.generation.config().model)
            .finish()
    }
}

impl LlmServiceProfiles {
    /// Creates a new service from an explicit config.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the config is invalid or the client cannot be built.
    pub fn new(generation: LlmModelConfig) -> Result<Self, AiLlmError> {
        generation.validate()?;
        Ok(Self {
            generation: HuggingFaceService::new(generation)?,
        })
    }

    /// Creates a new service from environment defaults (see `default_config`).
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::new(config_hf_generation()?)
    }

    /// Generates text using the **generation** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if generation fails.
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        self.generation.generate(prompt).await
    }

    /// Config of the generation profile.
    pub fn generation(&self) -> &LlmModelConfig {
        self.generation.config()
    }
}

impl TextGenerator for LlmServiceProfiles {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>> {
        Box::pin(LlmServiceProfiles::generate(self, prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config::{DEFAULT_GENERATION_MODEL, DEFAULT_INFERENCE_URL};

    fn cfg(model: &str) -> LlmModelConfig {
        LlmModelConfig {
            model: model.into(),
            endpoint: DEFAULT_INFERENCE_URL.into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn builds_without_a_token() {
        let svc = LlmServiceProfiles::new(cfg(DEFAULT_GENERATION_MODEL)).unwrap();
        assert_eq!(svc.generation().model, DEFAULT_GENERATION_MODEL);
        assert!(svc.generation().api_key.is_none());
    }

    #[test]
    fn invalid_profile_fails_construction() {
        let err = LlmServiceProfiles::new(cfg("")).unwrap_err();
        assert!(matches!(err, AiLlmError::Config(_)));
    }
}
