//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for brainstorm-ai
#[derive(Parser, Debug)]
#[command(name = "brainstorm-ai")]
#[command(author, version, about = "Multi-role LLM brainstorming pipeline")]
#[command(long_about = r#"
Brainstorm AI runs an objective through repeated cycles of LLM debate
(creation, critique, defense, rebuttal, revision, scoring), synthesizes the
best ideas, and develops each into a concrete application plan.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./brainstorm.toml   Project-level config
3. ~/.config/brainstorm-ai/config.toml   Global config

Example:
  brainstorm-ai "Reduce food waste in urban supermarkets"
  brainstorm-ai --cycles 5 --top-ideas 2 "New revenue streams for a small bakery"
"#)]
pub struct Cli {
    /// The objective to brainstorm (required unless configured in a file)
    pub objective: Option<String>,

    /// Background context for the brainstorming session
    #[arg(long, value_name = "TEXT")]
    pub context: Option<String>,

    /// Constraints the ideas must respect
    #[arg(long, value_name = "TEXT")]
    pub constraints: Option<String>,

    /// Number of brainstorming cycles to run
    #[arg(long, value_name = "N")]
    pub cycles: Option<usize>,

    /// Number of top ideas to develop into application plans
    #[arg(long, value_name = "N")]
    pub top_ideas: Option<usize>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators and the cost estimate
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_objective_and_overrides() {
        let cli = Cli::parse_from([
            "brainstorm-ai",
            "cheaper rockets",
            "--cycles",
            "5",
            "--top-ideas",
            "2",
            "-vv",
        ]);
        assert_eq!(cli.objective.as_deref(), Some("cheaper rockets"));
        assert_eq!(cli.cycles, Some(5));
        assert_eq!(cli.top_ideas, Some(2));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn objective_is_optional() {
        let cli = Cli::parse_from(["brainstorm-ai", "--show-config"]);
        assert!(cli.objective.is_none());
        assert!(cli.show_config);
    }
}
