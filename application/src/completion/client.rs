//! Resilient completion client.
//!
//! Wraps a [`CompletionBackend`] with role-based model/temperature resolution,
//! an explicit retry loop with exponential backoff, and cost accounting.
//! Retry exhaustion is a first-class state ([`CompletionError::Exhausted`]),
//! not an exception side channel: each attempt's outcome is classified as
//! success, transient failure, or fatal failure, and only transient failures
//! consume the attempt budget.

use crate::config::{RetryPolicy, RoleSettings};
use crate::ports::backend::{BackendError, CompletionBackend, CompletionRequest};
use crate::completion::usage::UsageAccumulator;
use brainstorm_domain::{PricingTable, Role};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors surfaced by the completion client
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Credential or required-config value missing; raised before any retry.
    #[error("completion configuration error: {0}")]
    Config(String),

    /// Every attempt failed with a transient error.
    #[error("completion retries exhausted after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: BackendError,
    },

    /// A non-transient failure; wrapped and raised immediately, never retried.
    #[error("unexpected completion failure: {source}")]
    Unexpected {
        #[source]
        source: BackendError,
    },
}

/// Optional per-call overrides of the role-based defaults
#[derive(Debug, Clone, Default)]
pub struct CompletionOverrides {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_retries: Option<u32>,
}

/// Completion client: one instance per session run, shared by all role steps
pub struct CompletionClient {
    backend: Arc<dyn CompletionBackend>,
    roles: RoleSettings,
    pricing: PricingTable,
    retry: RetryPolicy,
    usage: Arc<UsageAccumulator>,
}

impl CompletionClient {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        roles: RoleSettings,
        pricing: PricingTable,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            backend,
            roles,
            pricing,
            retry,
            usage: Arc::new(UsageAccumulator::new()),
        }
    }

    /// Shared usage accumulator for end-of-run statistics.
    pub fn usage(&self) -> Arc<UsageAccumulator> {
        Arc::clone(&self.usage)
    }

    /// Perform one completion for a role with its configured defaults.
    pub async fn complete(&self, role: Role, prompt: &str) -> Result<String, CompletionError> {
        self.complete_with(role, prompt, CompletionOverrides::default())
            .await
    }

    /// Perform one completion with explicit overrides.
    ///
    /// On success the usage accumulator is updated with token counts and the
    /// dollar cost from the pricing table; nothing is mutated on failure.
    pub async fn complete_with(
        &self,
        role: Role,
        prompt: &str,
        overrides: CompletionOverrides,
    ) -> Result<String, CompletionError> {
        let model = overrides
            .model
            .unwrap_or_else(|| self.roles.model_for(role).to_string());
        let temperature = overrides
            .temperature
            .unwrap_or_else(|| self.roles.temperature_for(role));
        let max_retries = overrides.max_retries.unwrap_or(self.retry.max_retries).max(1);

        let request = CompletionRequest {
            prompt: prompt.to_string(),
            model: model.clone(),
            temperature,
        };

        let mut last_transient: Option<BackendError> = None;

        for attempt in 0..max_retries {
            debug!(
                role = %role,
                model = %model,
                attempt = attempt + 1,
                max_retries,
                "completion attempt"
            );

            match self.backend.complete(&request).await {
                Ok(response) => {
                    let cost = self.pricing.cost(
                        &model,
                        response.prompt_tokens,
                        response.completion_tokens,
                    );
                    self.usage.record(
                        &model,
                        response.prompt_tokens,
                        response.completion_tokens,
                        cost,
                    );
                    info!(
                        role = %role,
                        model = %model,
                        prompt_tokens = response.prompt_tokens,
                        completion_tokens = response.completion_tokens,
                        cost = format!("{cost:.4}"),
                        "completion succeeded"
                    );
                    return Ok(response.text.trim().to_string());
                }
                Err(err) if err.is_configuration() => {
                    error!(role = %role, error = %err, "configuration error, not retrying");
                    return Err(CompletionError::Config(err.to_string()));
                }
                Err(err) if err.is_transient() => {
                    warn!(
                        role = %role,
                        attempt = attempt + 1,
                        max_retries,
                        error = %err,
                        "transient completion failure"
                    );
                    let rate_limited = err.is_rate_limited();
                    last_transient = Some(err);
                    if attempt + 1 < max_retries {
                        let delay = self.retry.delay_for(attempt, rate_limited);
                        debug!(delay_secs = delay.as_secs_f64(), "backing off before retry");
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(err) => {
                    error!(role = %role, error = %err, "unexpected completion failure");
                    return Err(CompletionError::Unexpected { source: err });
                }
            }
        }

        error!(role = %role, attempts = max_retries, "completion retries exhausted");
        Err(CompletionError::Exhausted {
            attempts: max_retries,
            source: last_transient
                .unwrap_or_else(|| BackendError::Other("no attempt recorded".to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::backend::CompletionResponse;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use brainstorm_domain::ModelPricing;

    /// Backend returning a scripted sequence of outcomes
    struct ScriptedBackend {
        outcomes: Mutex<VecDeque<Result<CompletionResponse, BackendError>>>,
        attempts: AtomicU32,
        last_request: Mutex<Option<CompletionRequest>>,
    }

    impl ScriptedBackend {
        fn new(outcomes: Vec<Result<CompletionResponse, BackendError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                attempts: AtomicU32::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn attempts(&self) -> u32 {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, BackendError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(BackendError::Other("script exhausted".to_string())))
        }
    }

    fn response(text: &str, prompt_tokens: u64, completion_tokens: u64) -> CompletionResponse {
        CompletionResponse {
            text: text.to_string(),
            prompt_tokens,
            completion_tokens,
        }
    }

    fn pricing_gpt4o() -> PricingTable {
        let mut models = HashMap::new();
        models.insert(
            "gpt-4o".to_string(),
            ModelPricing {
                input: 0.03,
                output: 0.06,
            },
        );
        PricingTable::new(models)
    }

    fn client_with(backend: Arc<ScriptedBackend>, max_retries: u32) -> CompletionClient {
        CompletionClient::new(
            backend,
            RoleSettings::default(),
            pricing_gpt4o(),
            RetryPolicy {
                max_retries,
                delay_base: 2.0,
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failure_then_success_records_one_call() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(BackendError::Timeout),
            Ok(response("  the idea  ", 100, 50)),
        ]));
        let client = client_with(Arc::clone(&backend), 2);

        let text = client.complete(Role::Creative, "prompt").await.unwrap();
        assert_eq!(text, "the idea");
        assert_eq!(backend.attempts(), 2);

        let stats = client.usage().snapshot();
        assert_eq!(stats.api_calls, 1);
        assert_eq!(stats.prompt_tokens, 100);
        assert_eq!(stats.completion_tokens, 50);
        // 100/1000*0.03 + 50/1000*0.06
        assert!((stats.total_cost - 0.006).abs() < 1e-12);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_after_exactly_max_retries() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(BackendError::Upstream("503".to_string())),
            Err(BackendError::Connection("reset".to_string())),
        ]));
        let client = client_with(Arc::clone(&backend), 2);

        let err = client.complete(Role::Critique, "prompt").await.unwrap_err();
        match err {
            CompletionError::Exhausted { attempts, source } => {
                assert_eq!(attempts, 2);
                assert!(matches!(source, BackendError::Connection(_)));
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
        assert_eq!(backend.attempts(), 2);
        assert_eq!(client.usage().snapshot().api_calls, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unexpected_error_is_not_retried() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err(BackendError::Other(
            "contract violation".to_string(),
        ))]));
        let client = client_with(Arc::clone(&backend), 3);

        let err = client.complete(Role::Score, "prompt").await.unwrap_err();
        assert!(matches!(err, CompletionError::Unexpected { .. }));
        assert_eq!(backend.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn configuration_error_is_not_retried() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err(BackendError::Credentials(
            "OPENAI_API_KEY is not set".to_string(),
        ))]));
        let client = client_with(Arc::clone(&backend), 3);

        let err = client.complete(Role::Plan, "prompt").await.unwrap_err();
        assert!(matches!(err, CompletionError::Config(_)));
        assert_eq!(backend.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn overrides_replace_role_defaults() {
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(response("ok", 1, 1))]));
        let client = client_with(Arc::clone(&backend), 3);

        client
            .complete_with(
                Role::Creative,
                "prompt",
                CompletionOverrides {
                    model: Some("gpt-4.1".to_string()),
                    temperature: Some(0.2),
                    max_retries: None,
                },
            )
            .await
            .unwrap();

        let request = backend.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "gpt-4.1");
        assert_eq!(request.temperature, 0.2);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_retries_then_succeeds() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(BackendError::RateLimited("429".to_string())),
            Ok(response("ok", 10, 10)),
        ]));
        let client = client_with(Arc::clone(&backend), 3);

        // start_paused auto-advances the longer rate-limit backoff
        let text = client.complete(Role::Synthesis, "prompt").await.unwrap();
        assert_eq!(text, "ok");
        assert_eq!(backend.attempts(), 2);
    }
}
