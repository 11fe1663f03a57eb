//! Completion backend port
//!
//! Defines the interface for performing one text-completion request against an
//! external service. Implementations (adapters) live in the infrastructure
//! layer; retry, backoff, and cost accounting stay in the application layer's
//! [`CompletionClient`](crate::completion::CompletionClient).

use async_trait::async_trait;
use thiserror::Error;

/// Errors a backend can report for a single request attempt
#[derive(Error, Debug)]
pub enum BackendError {
    /// The service asked us to slow down. Transient, retried with a longer delay.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Could not reach the service. Transient.
    #[error("connection error: {0}")]
    Connection(String),

    /// The request did not complete in time. Transient.
    #[error("request timed out")]
    Timeout,

    /// The service failed on its side (5xx-class). Transient.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Credential or required configuration missing. Fatal, never retried.
    #[error("credential configuration error: {0}")]
    Credentials(String),

    /// Anything else: contract violations, decode failures. Not retried.
    #[error("{0}")]
    Other(String),
}

impl BackendError {
    /// Whether this failure is worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BackendError::RateLimited(_)
                | BackendError::Connection(_)
                | BackendError::Timeout
                | BackendError::Upstream(_)
        )
    }

    /// Rate-limit failures back off longer than other transient failures.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, BackendError::RateLimited(_))
    }

    /// Configuration-class failures are surfaced before any retry loop runs.
    pub fn is_configuration(&self) -> bool {
        matches!(self, BackendError::Credentials(_))
    }
}

/// One completion request: the opaque wire contract of the core
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
}

/// One completion response with token usage
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub text: String,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

/// Backend performing a single completion attempt
///
/// Implementations must not retry internally; the completion client owns the
/// retry policy.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, BackendError>;
}
