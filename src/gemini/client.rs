//! Gemini `generateText` client with per-request key failover.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{explain_prompt, KeyRing, MISSING_TEXT_PLACEHOLDER};
use crate::config::GeminiConfig;

/// Why a single key attempt did not produce an explanation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("empty API key slot")]
    EmptyKey,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("response body is not JSON: {0}")]
    Decode(String),
    #[error("response body is not a JSON object")]
    UnexpectedShape,
}

/// One absorbed failure: which slot was tried and what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    pub slot: usize,
    pub reason: AttemptError,
}

/// Every slot was tried once without a successful call.
#[derive(Debug, Error)]
#[error("all {} Gemini API key attempts failed", .failures.len())]
pub struct KeysExhausted {
    pub failures: Vec<AttemptFailure>,
}

#[derive(Serialize)]
struct GenerateTextRequest<'a> {
    prompt: &'a str,
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    keys: KeyRing,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("failed to build Gemini HTTP client")?;

        info!(
            model = %config.model,
            slots = config.api_keys.len(),
            usable = config.usable_keys(),
            "Gemini client ready"
        );

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            keys: KeyRing::new(config.api_keys.clone()),
        })
    }

    pub fn keys(&self) -> &KeyRing {
        &self.keys
    }

    /// Explain a concept, trying each key slot at most once.
    ///
    /// The ring's cursor is left wherever the loop stopped: on the key that
    /// succeeded, or one full turn past the starting slot after exhaustion.
    pub async fn explain(&self, concept: &str) -> Result<String, KeysExhausted> {
        let prompt = explain_prompt(concept);
        let mut failures = Vec::new();

        for _ in 0..self.keys.len() {
            let Some((slot, key)) = self.keys.current() else {
                break;
            };

            if key.is_empty() {
                debug!(slot, "skipping empty API key slot");
                failures.push(AttemptFailure {
                    slot,
                    reason: AttemptError::EmptyKey,
                });
                self.keys.advance();
                continue;
            }

            match self.generate(key, &prompt).await {
                Ok(text) => {
                    info!(slot, attempts = failures.len() + 1, "Gemini explanation received");
                    return Ok(text);
                }
                Err(reason) => {
                    warn!(slot, error = %reason, "Gemini call failed, rotating to next key");
                    failures.push(AttemptFailure { slot, reason });
                    self.keys.advance();
                }
            }
        }

        Err(KeysExhausted { failures })
    }

    /// One `generateText` call. A non-2xx status is a failed attempt even when the
    /// body is JSON, unlike the Flask service this replaces, which took any JSON reply
    /// (a 429 quota error included) as a placeholder explanation.
    async fn generate(&self, key: &str, prompt: &str) -> Result<String, AttemptError> {
        let endpoint = format!("{}/v1/models/{}:generateText", self.base_url, self.model);
        let url = reqwest::Url::parse_with_params(&endpoint, &[("key", key)])
            .map_err(|e| AttemptError::Transport(format!("invalid endpoint: {e}")))?;

        let response = self
            .http
            .post(url)
            .json(&GenerateTextRequest { prompt })
            .send()
            .await
            .map_err(|e| AttemptError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AttemptError::Decode(e.without_url().to_string()))?;

        extract_text(&body)
    }
}

/// Pull the explanation out of a response body.
fn extract_text(body: &Value) -> Result<String, AttemptError> {
    let Value::Object(fields) = body else {
        return Err(AttemptError::UnexpectedShape);
    };

    Ok(match fields.get("text") {
        None => MISSING_TEXT_PLACEHOLDER.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    })
}
