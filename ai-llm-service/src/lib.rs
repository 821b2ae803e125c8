//! Hosted LLM access for the RAG service.
//!
//! Text generation served by the Hugging Face Inference API, unified errors,
//! env-driven configs and a tracing layer.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;
pub mod telemetry;
pub mod text_generator;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{AiLlmError, ConfigError, ProviderError};
pub use service_profiles::LlmServiceProfiles;
pub use text_generator::TextGenerator;
