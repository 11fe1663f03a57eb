//! Token and cost accounting across one client's lifetime.

use std::collections::HashMap;
use std::sync::Mutex;

/// Usage attributed to one model
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelUsage {
    pub calls: u64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub cost: f64,
}

/// Point-in-time snapshot of accumulated usage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageStats {
    pub api_calls: u64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_cost: f64,
    /// Per-model breakdown, sorted by model name for stable display
    pub by_model: Vec<(String, ModelUsage)>,
}

impl UsageStats {
    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

#[derive(Debug, Default)]
struct Inner {
    api_calls: u64,
    prompt_tokens: u64,
    completion_tokens: u64,
    total_cost: f64,
    by_model: HashMap<String, ModelUsage>,
}

/// Running totals of prompt tokens, completion tokens, dollar cost, and call
/// count, plus a per-model breakdown.
///
/// Monotonically increasing for the lifetime of one completion client; reset
/// only by an explicit [`reset`](UsageAccumulator::reset). The single writer is
/// the completion client, but increments are guarded anyway so the accumulator
/// can be shared read-side with other callers.
#[derive(Debug, Default)]
pub struct UsageAccumulator {
    inner: Mutex<Inner>,
}

impl UsageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successful API call.
    pub fn record(&self, model: &str, prompt_tokens: u64, completion_tokens: u64, cost: f64) {
        let mut inner = self.inner.lock().unwrap();
        inner.api_calls += 1;
        inner.prompt_tokens += prompt_tokens;
        inner.completion_tokens += completion_tokens;
        inner.total_cost += cost;

        let entry = inner.by_model.entry(model.to_string()).or_default();
        entry.calls += 1;
        entry.prompt_tokens += prompt_tokens;
        entry.completion_tokens += completion_tokens;
        entry.cost += cost;
    }

    /// Snapshot the current totals.
    pub fn snapshot(&self) -> UsageStats {
        let inner = self.inner.lock().unwrap();
        let mut by_model: Vec<(String, ModelUsage)> = inner
            .by_model
            .iter()
            .map(|(model, usage)| (model.clone(), *usage))
            .collect();
        by_model.sort_by(|a, b| a.0.cmp(&b.0));

        UsageStats {
            api_calls: inner.api_calls,
            prompt_tokens: inner.prompt_tokens,
            completion_tokens: inner.completion_tokens,
            total_cost: inner.total_cost,
            by_model,
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        *self.inner.lock().unwrap() = Inner::default();
    }
}
