//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./brainstorm.toml` or `./.brainstorm.toml`
    /// 3. Global: `$XDG_CONFIG_HOME/brainstorm-ai/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("brainstorm-ai").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        for filename in &["brainstorm.toml", ".brainstorm.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./brainstorm.toml or ./.brainstorm.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_defaults_yields_working_config() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.session.cycles, 3);
        assert!(config.validate().iter().all(|i| i.contains("objective")));
    }

    #[test]
    fn global_config_path_names_the_app_dir() {
        let path = ConfigLoader::global_config_path();
        if let Some(path) = path {
            assert!(path.to_string_lossy().contains("brainstorm-ai"));
        }
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let raw = "[session]\nobjective = \"from file\"\ncycles = 5\n";
        let figment = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::string(raw));
        let config: FileConfig = figment.extract().unwrap();
        assert_eq!(config.session.objective, "from file");
        assert_eq!(config.session.cycles, 5);
        assert_eq!(config.session.top_ideas, 3);
    }
}
