//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file and
//! convert into the application layer's runtime settings. Every section has
//! defaults, so an empty file (or no file) yields a working configuration.

use brainstorm_application::{RetryPolicy, RoleSettings, SessionParams, SessionSettings};
use brainstorm_domain::{ExtractionStrategy, ModelPricing, PricingTable, Role, ScoreSchema};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Session parameters from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    pub objective: String,
    pub context: String,
    pub constraints: String,
    pub cycles: usize,
    pub top_ideas: usize,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            objective: String::new(),
            context: String::new(),
            constraints: String::new(),
            cycles: 3,
            top_ideas: 3,
        }
    }
}

/// Per-role model and temperature overrides from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRolesConfig {
    pub default_model: String,
    pub default_temperature: f32,
    /// Role id -> model name
    pub models: HashMap<Role, String>,
    /// Role id -> sampling temperature
    pub temperatures: HashMap<Role, f32>,
}

impl Default for FileRolesConfig {
    fn default() -> Self {
        Self {
            default_model: "gpt-4o".to_string(),
            default_temperature: 0.7,
            models: HashMap::new(),
            temperatures: HashMap::new(),
        }
    }
}

/// API behavior from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    pub max_retries: u32,
    pub retry_delay_base: f64,
    /// Alternative OpenAI-compatible endpoint
    pub base_url: Option<String>,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay_base: 2.0,
            base_url: None,
        }
    }
}

/// History window budget from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileContextConfig {
    pub max_history_chars: usize,
}

impl Default for FileContextConfig {
    fn default() -> Self {
        Self {
            max_history_chars: 120_000,
        }
    }
}

/// Idea extraction strategy order from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExtractionConfig {
    pub strategies: Vec<ExtractionStrategy>,
}

impl Default for FileExtractionConfig {
    fn default() -> Self {
        Self {
            strategies: ExtractionStrategy::default_order(),
        }
    }
}

/// Export enable flags and directories from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExportConfig {
    pub json: bool,
    pub yaml: bool,
    pub markdown: bool,
    pub save_individual_ideas: bool,
    pub logs_dir: PathBuf,
    pub exports_dir: PathBuf,
}

impl Default for FileExportConfig {
    fn default() -> Self {
        Self {
            json: true,
            yaml: true,
            markdown: true,
            save_individual_ideas: true,
            logs_dir: PathBuf::from("data/logs"),
            exports_dir: PathBuf::from("data/exports"),
        }
    }
}

fn default_pricing() -> HashMap<String, ModelPricing> {
    let mut pricing = HashMap::new();
    pricing.insert(
        "gpt-4o".to_string(),
        ModelPricing {
            input: 0.0025,
            output: 0.01,
        },
    );
    pricing.insert(
        "gpt-4o-mini".to_string(),
        ModelPricing {
            input: 0.00015,
            output: 0.0006,
        },
    );
    pricing
}

/// The complete TOML configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub session: FileSessionConfig,
    pub roles: FileRolesConfig,
    pub api: FileApiConfig,
    pub context: FileContextConfig,
    pub scoring: ScoreSchema,
    pub extraction: FileExtractionConfig,
    pub export: FileExportConfig,
    /// Model name -> dollars per 1000 tokens
    pub pricing: HashMap<String, ModelPricing>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            session: FileSessionConfig::default(),
            roles: FileRolesConfig::default(),
            api: FileApiConfig::default(),
            context: FileContextConfig::default(),
            scoring: ScoreSchema::default(),
            extraction: FileExtractionConfig::default(),
            export: FileExportConfig::default(),
            pricing: default_pricing(),
        }
    }
}

impl FileConfig {
    /// Validate the loaded configuration, returning a list of issues.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.session.objective.trim().is_empty() {
            issues.push("session.objective must not be empty".to_string());
        }
        if self.session.cycles < 1 {
            issues.push("session.cycles must be >= 1".to_string());
        }
        if self.session.top_ideas < 1 {
            issues.push("session.top_ideas must be >= 1".to_string());
        }
        if self.api.max_retries < 1 {
            issues.push("api.max_retries must be >= 1".to_string());
        }
        if self.api.retry_delay_base <= 0.0 {
            issues.push("api.retry_delay_base must be positive".to_string());
        }
        if self.scoring.min_value > self.scoring.max_value {
            issues.push("scoring.min_value must be <= scoring.max_value".to_string());
        }
        if self.scoring.required_keys.is_empty() {
            issues.push("scoring.required_keys must not be empty".to_string());
        }
        issues
    }

    pub fn session_params(&self) -> SessionParams {
        SessionParams {
            objective: self.session.objective.clone(),
            context: self.session.context.clone(),
            constraints: self.session.constraints.clone(),
            cycles: self.session.cycles,
            top_ideas: self.session.top_ideas,
        }
    }

    pub fn role_settings(&self) -> RoleSettings {
        let mut settings =
            RoleSettings::new(&self.roles.default_model, self.roles.default_temperature);
        for (role, model) in &self.roles.models {
            settings = settings.with_model(*role, model.clone());
        }
        for (role, temperature) in &self.roles.temperatures {
            settings = settings.with_temperature(*role, *temperature);
        }
        settings
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.api.max_retries,
            delay_base: self.api.retry_delay_base,
        }
    }

    pub fn pricing_table(&self) -> PricingTable {
        PricingTable::new(self.pricing.clone())
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            params: self.session_params(),
            max_history_chars: self.context.max_history_chars,
            score_schema: self.scoring.clone(),
            extraction_strategies: self.extraction.strategies.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_original_values() {
        let config = FileConfig::default();
        assert_eq!(config.session.cycles, 3);
        assert_eq!(config.session.top_ideas, 3);
        assert_eq!(config.api.max_retries, 3);
        assert_eq!(config.context.max_history_chars, 120_000);
        assert_eq!(config.scoring.fallback_value, 6);
        assert_eq!(
            config.extraction.strategies,
            ExtractionStrategy::default_order()
        );
        assert!(config.export.json && config.export.yaml && config.export.markdown);
    }

    #[test]
    fn validate_flags_empty_objective_and_bad_counts() {
        let mut config = FileConfig::default();
        config.session.cycles = 0;
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("objective")));
        assert!(issues.iter().any(|i| i.contains("cycles")));
    }

    #[test]
    fn toml_overrides_merge_per_role() {
        let raw = r#"
            [session]
            objective = "improve onboarding"
            cycles = 2

            [roles]
            default_model = "gpt-4o-mini"

            [roles.models]
            creative = "gpt-4o"

            [roles.temperatures]
            creative = 0.95

            [pricing.gpt-4o]
            input = 0.03
            output = 0.06
        "#;
        let config: FileConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.session.objective, "improve onboarding");
        assert_eq!(config.session.cycles, 2);
        // Untouched sections keep defaults
        assert_eq!(config.session.top_ideas, 3);

        let roles = config.role_settings();
        assert_eq!(roles.model_for(Role::Creative), "gpt-4o");
        assert_eq!(roles.model_for(Role::Critique), "gpt-4o-mini");
        assert_eq!(roles.temperature_for(Role::Creative), 0.95);

        let pricing = config.pricing_table();
        assert!((pricing.cost("gpt-4o", 1000, 0) - 0.03).abs() < 1e-12);
    }

    #[test]
    fn settings_conversion_preserves_params() {
        let mut config = FileConfig::default();
        config.session.objective = "X".to_string();
        let settings = config.session_settings();
        assert_eq!(settings.params.objective, "X");
        assert_eq!(settings.max_history_chars, 120_000);
        assert_eq!(settings.score_schema.required_keys.len(), 4);
    }
}
