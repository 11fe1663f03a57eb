//! Infrastructure layer for brainstorm-ai
//!
//! Adapters for the application-layer ports: the OpenAI-compatible completion
//! backend, configuration file loading, and the session/idea exporters.

pub mod config;
pub mod export;
pub mod providers;

pub use config::{ConfigLoader, FileConfig};
pub use export::{IdeaFileWriter, JsonExporter, MarkdownExporter, YamlExporter};
pub use providers::{OpenAiBackend, ProviderConfigError};
