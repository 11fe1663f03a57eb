//! Configuration: TOML file structures and the multi-source loader

mod file_config;
mod loader;

pub use file_config::{
    FileApiConfig, FileConfig, FileContextConfig, FileExportConfig, FileExtractionConfig,
    FileRolesConfig, FileSessionConfig,
};
pub use loader::ConfigLoader;
