use crate::error_handler::{ConfigError, Result, validate_http_endpoint, validate_range_f32};

/// Configuration for a hosted model invocation.
///
/// One instance describes one text-generation model on the inference provider.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_model_config::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     model: "mistralai/Mistral-7B-Instruct-v0.2".to_string(),
///     endpoint: "https://api-inference.huggingface.co".to_string(),
///     api_key: Some("hf_...".to_string()),
///     max_tokens: Some(200),
///     temperature: Some(0.2),
///     top_p: None,
///     timeout_secs: None,
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model repository id (e.g., `"mistralai/Mistral-7B-Instruct-v0.2"`).
    pub model: String,

    /// Inference API base URL.
    pub endpoint: String,

    /// Optional bearer token. Not required to build a client; the provider
    /// rejects unauthenticated calls on its own.
    pub api_key: Option<String>,

    /// Maximum number of new tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds). `None` means no client timeout.
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Checks model name, endpoint scheme and sampling ranges.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_http_endpoint("HF_INFERENCE_URL", self.endpoint.trim())?;
        if let Some(t) = self.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0, "expected 0.0..=2.0")?;
        }
        if let Some(p) = self.top_p {
            validate_range_f32("top_p", p, 0.0, 1.0, "expected 0.0..=1.0")?;
        }
        if self.max_tokens == Some(0) {
            return Err(ConfigError::OutOfRange {
                field: "max_tokens",
                detail: "expected a positive number",
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::AiLlmError;

    fn base() -> LlmModelConfig {
        LlmModelConfig {
            model: "m".into(),
            endpoint: "https://hf.test".into(),
            api_key: None,
            max_tokens: Some(200),
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn empty_model_is_rejected() {
        let cfg = LlmModelConfig {
            model: "  ".into(),
            ..base()
        };
        assert!(matches!(
            cfg.validate(),
            Err(AiLlmError::Config(ConfigError::EmptyModel))
        ));
    }

    #[test]
    fn zero_max_tokens_is_rejected() {
        let cfg = LlmModelConfig {
            max_tokens: Some(0),
            ..base()
        };
        assert!(cfg.validate().is_err());
    }
}
