//! Hugging Face Inference API client for text generation.
//!
//! Minimal, non-streaming client: `POST {endpoint}/models/{model}`.
//!
//! Constructor validation:
//! - `cfg.endpoint` must start with http:// or https://
//! - `cfg.api_key`, when present, must be a valid header value
//!
//! A missing token is not an error here: the provider answers 401 and the
//! caller gets a [`ProviderError::HttpStatus`].

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, HttpError, ProviderError, make_snippet},
};

/// Thin client for one hosted model.
///
/// Keeps a preconfigured `reqwest::Client` (default headers, optional timeout).
#[derive(Debug)]
pub struct HuggingFaceService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
}

impl HuggingFaceService {
    /// Creates a new [`HuggingFaceService`] from the given config.
    ///
    /// # Errors
    /// - [`ProviderError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`ProviderError::InvalidToken`] if the token is not a valid header value
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::InvalidEndpoint(cfg.endpoint.clone()).into());
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(token) = cfg.api_key.as_deref() {
            let value = header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ProviderError::InvalidToken(e.to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let model = cfg.model.trim().trim_matches('/');
        let url_generate = format!("{base}/models/{model}");

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            has_token = cfg.api_key.is_some(),
            timeout_secs = ?cfg.timeout_secs,
            "HuggingFaceService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// Config this client was built from.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// Performs a **non-streaming** text-generation request.
    ///
    /// Mapped options from config: `temperature`, `top_p`, `max_new_tokens`.
    /// The prompt is not echoed back (`return_full_text = false`).
    ///
    /// # Errors
    /// - [`ProviderError::HttpStatus`] for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`ProviderError::Decode`] if the JSON cannot be parsed
    /// - [`ProviderError::EmptyOutput`] if no generation is returned
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = GenerateRequest::from_cfg(&self.cfg, prompt);

        debug!(prompt_len = prompt.len(), "POST {}", self.url_generate);
        let text = self.post_json(&self.url_generate, &body, started).await?;

        let out = decode_generation(&text)?;
        info!(
            latency_ms = started.elapsed().as_millis(),
            output_len = out.len(),
            "text generation completed"
        );
        Ok(out)
    }

    /// Posts a JSON body and returns the raw reply text on 2xx.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        started: Instant,
    ) -> Result<String, AiLlmError> {
        let resp = self.client.post(url).json(body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let snippet = make_snippet(&text);
            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "inference API returned non-success status"
            );
            return Err(ProviderError::HttpStatus(HttpError {
                status,
                url: url.to_string(),
                snippet,
            })
            .into());
        }

        Ok(text)
    }
}

/// Decodes a text-generation reply: `[{"generated_text": ".."}]` or the bare object.
fn decode_generation(body: &str) -> Result<String, AiLlmError> {
    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::Decode(format!(
            "serde error: {e}; expected `[{{\"generated_text\": string}}]`"
        ))
    })?;

    let text = match parsed {
        GenerateResponse::Batch(items) => items.into_iter().next().map(|g| g.generated_text),
        GenerateResponse::Single(item) => Some(item.generated_text),
    };

    text.ok_or_else(|| ProviderError::EmptyOutput.into())
}

/* ===========================================================================
HTTP payloads & options
======================================================================== */

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
    options: InferenceOptions,
}

impl<'a> GenerateRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            inputs: prompt,
            parameters: GenerateParameters {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                max_new_tokens: cfg.max_tokens,
                return_full_text: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_new_tokens: Option<u32>,
    return_full_text: bool,
}

/// Asks the provider to block until a cold model is loaded instead of replying 503.
#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            model: "mistralai/Mistral-7B-Instruct-v0.2".into(),
            endpoint: "https://hf.test/".into(),
            api_key: Some("hf_token".into()),
            max_tokens: Some(200),
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn url_is_derived_from_endpoint_and_model() {
        let svc = HuggingFaceService::new(cfg()).unwrap();
        assert_eq!(
            svc.url_generate,
            "https://hf.test/models/mistralai/Mistral-7B-Instruct-v0.2"
        );
    }

    #[test]
    fn missing_token_is_not_a_construction_error() {
        let anonymous = LlmModelConfig {
            api_key: None,
            ..cfg()
        };
        assert!(HuggingFaceService::new(anonymous).is_ok());
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let bad = LlmModelConfig {
            endpoint: "hf.test".into(),
            ..cfg()
        };
        let err = HuggingFaceService::new(bad).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn generate_request_carries_sampling_parameters() {
        let c = cfg();
        let body = serde_json::to_value(GenerateRequest::from_cfg(&c, "hi")).unwrap();
        assert_eq!(body["inputs"], "hi");
        assert_eq!(body["parameters"]["max_new_tokens"], 200);
        assert_eq!(body["parameters"]["return_full_text"], false);
        assert!((body["parameters"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert!(body["parameters"].get("top_p").is_none());
        assert_eq!(body["options"]["wait_for_model"], true);
    }

    #[test]
    fn generation_reply_shapes_are_decoded() {
        assert_eq!(
            decode_generation(r#"[{"generated_text":"hello"}]"#).unwrap(),
            "hello"
        );
        assert_eq!(
            decode_generation(r#"{"generated_text":"solo"}"#).unwrap(),
            "solo"
        );
        assert!(matches!(
            decode_generation("[]"),
            Err(AiLlmError::Provider(ProviderError::EmptyOutput))
        ));
        assert!(matches!(
            decode_generation(r#"{"error":"loading"}"#),
            Err(AiLlmError::Provider(ProviderError::Decode(_)))
        ));
    }
}
