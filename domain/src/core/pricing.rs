//! Per-model token pricing and cost math

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Price of one model in dollars per 1000 tokens (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Dollars per 1000 prompt tokens
    pub input: f64,
    /// Dollars per 1000 completion tokens
    pub output: f64,
}

impl Default for ModelPricing {
    /// Conservative default applied to models without an explicit entry.
    fn default() -> Self {
        Self {
            input: 0.001,
            output: 0.002,
        }
    }
}

/// Pricing table mapping model names to their token prices
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingTable {
    models: HashMap<String, ModelPricing>,
}

impl PricingTable {
    pub fn new(models: HashMap<String, ModelPricing>) -> Self {
        Self { models }
    }

    /// Pricing for a model, falling back to the default entry when unknown.
    pub fn pricing_for(&self, model: &str) -> ModelPricing {
        self.models.get(model).copied().unwrap_or_default()
    }

    /// Dollar cost of one API call:
    /// `input_tokens/1000 × input_price + output_tokens/1000 × output_price`.
    pub fn cost(&self, model: &str, input_tokens: u64, output_tokens: u64) -> f64 {
        let pricing = self.pricing_for(model);
        (input_tokens as f64 / 1000.0) * pricing.input
            + (output_tokens as f64 / 1000.0) * pricing.output
    }

    /// Rough pre-run cost estimate for a full session.
    ///
    /// Uses average observed token counts per call (2000 in / 800 out) and the
    /// call count derived from the pipeline shape.
    pub fn estimate_session_cost(&self, model: &str, cycles: usize, ideas: usize) -> SessionEstimate {
        const AVG_INPUT_PER_CALL: u64 = 2000;
        const AVG_OUTPUT_PER_CALL: u64 = 800;
        const CALLS_PER_CYCLE: usize = 6;
        const CALLS_PER_IDEA: usize = 4;

        let total_calls = cycles * CALLS_PER_CYCLE + 1 + ideas * CALLS_PER_IDEA;
        let input_tokens = total_calls as u64 * AVG_INPUT_PER_CALL;
        let output_tokens = total_calls as u64 * AVG_OUTPUT_PER_CALL;

        SessionEstimate {
            total_calls,
            input_tokens,
            output_tokens,
            cost: self.cost(model, input_tokens, output_tokens),
        }
    }
}

/// Estimated resource usage for a session, before it runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionEstimate {
    pub total_calls: usize,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost: f64,
}

/// Approximate token count of a text (~1 token per 4 characters).
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}
