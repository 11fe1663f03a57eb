//! Presentation layer for brainstorm-ai
//!
//! This crate contains CLI definitions, output formatters,
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::summary::ConsoleSummary;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
