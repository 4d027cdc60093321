//! Client for a local text-generation server speaking the Ollama
//! `/api/generate` protocol.

use crate::config::LlmConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("LLM error: {0}")]
    Transport(String),

    #[error("LLM error: server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("LLM error: unexpected response: {0}")]
    Decode(String),
}

/// Something that turns a prompt into text.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

pub struct OllamaClient {
    client: reqwest::blocking::Client,
    url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(cfg: &LlmConfig) -> Result<Self, GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: cfg.url.clone(),
            model: cfg.model.clone(),
        })
    }
}

impl TextGenerator for OllamaClient {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!(url = %self.url, model = %self.model, "calling generation service");

        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            warn!(%status, "generation service rejected the request");
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = resp
            .json()
            .map_err(|e| GenerationError::Decode(e.to_string()))?;

        let text = parsed.response.trim();
        if text.is_empty() {
            return Err(GenerationError::Decode("empty response".into()));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_wire_format() {
        let body = GenerateRequest {
            model: "phi3",
            prompt: "hi",
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "phi3", "prompt": "hi", "stream": false})
        );
    }

    #[test]
    fn missing_response_field_does_not_parse() {
        assert!(serde_json::from_str::<GenerateResponse>(r#"{"done": true}"#).is_err());
    }

    #[test]
    fn error_text_keeps_llm_marker() {
        let e = GenerationError::Transport("connection refused".into());
        assert!(e.to_string().starts_with("LLM error:"));
    }
}
