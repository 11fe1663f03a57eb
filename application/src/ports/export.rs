//! Persistence ports for completed sessions.
//!
//! The orchestrator's only contract with exporters: hand over the full session
//! record and do not proceed until each enabled exporter has returned or
//! failed. Exporter failures are isolated per format, so one bad format does
//! not prevent the others from succeeding.

use brainstorm_domain::{ApplicationLog, Session};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting session artifacts
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Exporter persisting a completed session in one format
pub trait SessionExporter: Send + Sync {
    /// Short format name used in logs (e.g. "json", "yaml", "markdown")
    fn format(&self) -> &'static str;

    /// Persist the session, returning the path written.
    fn export(&self, session: &Session) -> Result<PathBuf, ExportError>;
}

/// Writer producing one artifact per selected top idea
pub trait IdeaExporter: Send + Sync {
    /// Persist the application log of the idea at the given 1-based rank.
    fn write_idea(&self, rank: usize, log: &ApplicationLog) -> Result<PathBuf, ExportError>;
}
