//! End-of-session console summaries

use brainstorm_application::UsageStats;
use brainstorm_domain::SessionEstimate;
use colored::Colorize;

/// Formats usage statistics and cost estimates for console display
pub struct ConsoleSummary;

impl ConsoleSummary {
    /// Format the pre-run cost estimate.
    pub fn format_estimate(estimate: &SessionEstimate, cycles: usize, ideas: usize) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "Estimated usage".cyan().bold()));
        output.push_str(&format!(
            "  {} cycles, up to {} application plans\n",
            cycles, ideas
        ));
        output.push_str(&format!("  API calls:  {}\n", estimate.total_calls));
        output.push_str(&format!(
            "  Tokens:     ~{} in / ~{} out\n",
            estimate.input_tokens, estimate.output_tokens
        ));
        output.push_str(&format!("  Cost:       ~${:.4}\n", estimate.cost));

        output
    }

    /// Format the post-run usage statistics.
    pub fn format_stats(stats: &UsageStats) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "Session usage".cyan().bold()));
        output.push_str(&format!("  API calls:  {}\n", stats.api_calls));
        output.push_str(&format!(
            "  Tokens:     {} ({} in / {} out)\n",
            stats.total_tokens(),
            stats.prompt_tokens,
            stats.completion_tokens
        ));
        output.push_str(&format!("  Cost:       ${:.4}\n", stats.total_cost));

        if stats.by_model.len() > 1 {
            output.push_str(&format!("  {}\n", "By model:".bold()));
            for (model, usage) in &stats.by_model {
                output.push_str(&format!(
                    "    {:<20} {} calls, {} tokens, ${:.4}\n",
                    model,
                    usage.calls,
                    usage.prompt_tokens + usage.completion_tokens,
                    usage.cost
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainstorm_application::UsageAccumulator;

    #[test]
    fn stats_summary_shows_totals() {
        let usage = UsageAccumulator::new();
        usage.record("gpt-4o", 1000, 500, 0.0075);

        let text = ConsoleSummary::format_stats(&usage.snapshot());
        assert!(text.contains("API calls:  1"));
        assert!(text.contains("1500 (1000 in / 500 out)"));
        assert!(text.contains("$0.0075"));
        // single model, no breakdown section
        assert!(!text.contains("By model"));
    }

    #[test]
    fn stats_summary_breaks_down_multiple_models() {
        let usage = UsageAccumulator::new();
        usage.record("gpt-4o", 1000, 500, 0.0075);
        usage.record("gpt-4o-mini", 100, 50, 0.0001);

        let text = ConsoleSummary::format_stats(&usage.snapshot());
        assert!(text.contains("By model"));
        assert!(text.contains("gpt-4o-mini"));
    }

    #[test]
    fn estimate_summary_names_the_shape() {
        let estimate = SessionEstimate {
            total_calls: 31,
            input_tokens: 62_000,
            output_tokens: 24_800,
            cost: 0.1116,
        };
        let text = ConsoleSummary::format_estimate(&estimate, 3, 3);
        assert!(text.contains("3 cycles"));
        assert!(text.contains("API calls:  31"));
        assert!(text.contains("$0.1116"));
    }
}
