//! OpenAI-compatible completion backend.
//!
//! Performs one `chat/completions` request per call and maps transport and
//! HTTP failures onto the application layer's transient/fatal error taxonomy.
//! No retries here: the completion client owns the retry policy. Works against
//! any OpenAI-compatible endpoint via [`with_base_url`](OpenAiBackend::with_base_url).

use async_trait::async_trait;
use brainstorm_application::{BackendError, CompletionBackend, CompletionRequest, CompletionResponse};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Construction-time configuration errors, raised before any network attempt
#[derive(Error, Debug)]
pub enum ProviderConfigError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Backend adapter for OpenAI-compatible chat completion APIs
#[derive(Clone)]
pub struct OpenAiBackend {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiBackend {
    /// Create a backend from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ProviderConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ProviderConfigError::MissingApiKey)?;
        Self::new(api_key)
    }

    pub fn new(api_key: String) -> Result<Self, ProviderConfigError> {
        if !api_key.starts_with("sk-") {
            warn!("OPENAI_API_KEY does not look like an OpenAI key");
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the backend at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct ChatUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

fn map_transport_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout
    } else if err.is_connect() {
        BackendError::Connection(err.to_string())
    } else {
        BackendError::Other(err.to_string())
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, BackendError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &request.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let detail = response.text().await.unwrap_or_default();
            return Err(BackendError::RateLimited(detail));
        }
        if status.is_server_error() {
            let detail = response.text().await.unwrap_or_default();
            return Err(BackendError::Upstream(format!("{status}: {detail}")));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(BackendError::Credentials(format!(
                "API rejected the configured key ({status})"
            )));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(BackendError::Other(format!("{status}: {detail}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Other(format!("malformed response body: {e}")))?;

        let usage = parsed.usage.unwrap_or_default();
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| BackendError::Other("response contained no completion".to_string()))?;

        Ok(CompletionResponse {
            text,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        })
    }
}
