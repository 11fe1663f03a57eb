//! Runtime settings consumed by the orchestrators and the completion client.
//!
//! These are explicitly constructed, dependency-injected values. The file
//! format that produces them lives in the infrastructure layer.

use brainstorm_domain::{ExtractionStrategy, Role, ScoreSchema};
use std::collections::HashMap;
use std::time::Duration;

/// The user-facing parameters of one session
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub objective: String,
    pub context: String,
    pub constraints: String,
    /// Requested cycle count (>= 1)
    pub cycles: usize,
    /// Requested top-idea count (>= 1)
    pub top_ideas: usize,
}

/// Per-role model and temperature defaults
#[derive(Debug, Clone)]
pub struct RoleSettings {
    default_model: String,
    default_temperature: f32,
    models: HashMap<Role, String>,
    temperatures: HashMap<Role, f32>,
}

impl RoleSettings {
    pub fn new(default_model: impl Into<String>, default_temperature: f32) -> Self {
        Self {
            default_model: default_model.into(),
            default_temperature,
            models: HashMap::new(),
            temperatures: HashMap::new(),
        }
    }

    pub fn with_model(mut self, role: Role, model: impl Into<String>) -> Self {
        self.models.insert(role, model.into());
        self
    }

    pub fn with_temperature(mut self, role: Role, temperature: f32) -> Self {
        self.temperatures.insert(role, temperature);
        self
    }

    pub fn model_for(&self, role: Role) -> &str {
        self.models
            .get(&role)
            .map(String::as_str)
            .unwrap_or(&self.default_model)
    }

    pub fn temperature_for(&self, role: Role) -> f32 {
        self.temperatures
            .get(&role)
            .copied()
            .unwrap_or(self.default_temperature)
    }
}

impl Default for RoleSettings {
    fn default() -> Self {
        Self::new("gpt-4o", 0.7)
    }
}

/// Retry policy for transient completion failures
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempt budget per call (>= 1)
    pub max_retries: u32,
    /// Base of the exponential backoff, in seconds
    pub delay_base: f64,
}

impl RetryPolicy {
    /// Backoff delay before the attempt after `attempt` (0-based) failed.
    ///
    /// Transient failures wait `base^attempt` seconds; rate-limit failures
    /// wait `base^(attempt+1) × 2` seconds.
    pub fn delay_for(&self, attempt: u32, rate_limited: bool) -> Duration {
        let secs = if rate_limited {
            self.delay_base.powi(attempt as i32 + 1) * 2.0
        } else {
            self.delay_base.powi(attempt as i32)
        };
        Duration::from_secs_f64(secs.max(0.0))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay_base: 2.0,
        }
    }
}

/// Everything the session orchestrator needs beyond the completion client
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub params: SessionParams,
    /// Character budget for the creative-history window
    pub max_history_chars: usize,
    pub score_schema: ScoreSchema,
    pub extraction_strategies: Vec<ExtractionStrategy>,
}

impl SessionSettings {
    pub fn new(params: SessionParams) -> Self {
        Self {
            params,
            max_history_chars: 120_000,
            score_schema: ScoreSchema::default(),
            extraction_strategies: ExtractionStrategy::default_order(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_settings_fall_back_to_defaults() {
        let settings = RoleSettings::new("gpt-4o", 0.7)
            .with_model(Role::Creative, "gpt-4.1")
            .with_temperature(Role::Creative, 0.95);

        assert_eq!(settings.model_for(Role::Creative), "gpt-4.1");
        assert_eq!(settings.model_for(Role::Critique), "gpt-4o");
        assert_eq!(settings.temperature_for(Role::Creative), 0.95);
        assert_eq!(settings.temperature_for(Role::Score), 0.7);
    }

    #[test]
    fn transient_backoff_is_exponential() {
        let policy = RetryPolicy {
            max_retries: 3,
            delay_base: 2.0,
        };
        assert_eq!(policy.delay_for(0, false), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1, false), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2, false), Duration::from_secs(4));
    }

    #[test]
    fn rate_limit_backoff_is_longer() {
        let policy = RetryPolicy {
            max_retries: 3,
            delay_base: 2.0,
        };
        // base^(attempt+1) * 2
        assert_eq!(policy.delay_for(0, true), Duration::from_secs(4));
        assert_eq!(policy.delay_for(1, true), Duration::from_secs(8));
    }
}
