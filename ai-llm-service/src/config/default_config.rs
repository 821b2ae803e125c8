//! Default model configs loaded from environment variables.
//!
//! Only text generation is hosted (Hugging Face Inference API); embeddings
//! run locally in `rag-store`.
//!
//! # Environment variables
//!
//! Common:
//! - `HF_INFERENCE_URL`          = inference API base (default `https://api-inference.huggingface.co`)
//! - `HUGGINGFACEHUB_API_TOKEN`  = bearer token (optional, checked by the provider, not here)
//! - `LLM_TIMEOUT_SECS`          = optional HTTP timeout (u64)
//!
//! Generation:
//! - `HF_MODEL_REPO`      = model id (default `mistralai/Mistral-7B-Instruct-v0.2`)
//! - `LLM_TEMPERATURE`    = sampling temperature (default `0.2`)
//! - `LLM_MAX_NEW_TOKENS` = generation cap (default `200`)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{Result, env_opt, env_opt_f32, env_opt_u32, env_opt_u64, env_or},
};

pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_GENERATION_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 200;

/// Name of the variable holding the provider token.
pub const TOKEN_VAR: &str = "HUGGINGFACEHUB_API_TOKEN";

/// Constructs the config for the text-generation model.
///
/// # Errors
/// Returns a config error if a numeric variable does not parse or the
/// resulting config fails [`LlmModelConfig::validate`].
pub fn config_hf_generation() -> Result<LlmModelConfig> {
    let cfg = LlmModelConfig {
        model: env_or("HF_MODEL_REPO", DEFAULT_GENERATION_MODEL),
        endpoint: env_or("HF_INFERENCE_URL", DEFAULT_INFERENCE_URL),
        api_key: env_opt(TOKEN_VAR),
        max_tokens: Some(env_opt_u32("LLM_MAX_NEW_TOKENS")?.unwrap_or(DEFAULT_MAX_NEW_TOKENS)),
        temperature: Some(env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE)),
        top_p: None,
        timeout_secs: env_opt_u64("LLM_TIMEOUT_SECS")?,
    };
    cfg.validate()?;
    Ok(cfg)
}
