//! JSON session exporter

use super::{atomic_write, log_stem};
use brainstorm_application::{ExportError, SessionExporter};
use brainstorm_domain::Session;
use std::path::{Path, PathBuf};

/// Writes the full session record as pretty-printed JSON
pub struct JsonExporter {
    logs_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(logs_dir: impl AsRef<Path>) -> Self {
        Self {
            logs_dir: logs_dir.as_ref().to_path_buf(),
        }
    }
}

impl SessionExporter for JsonExporter {
    fn format(&self) -> &'static str {
        "json"
    }

    fn export(&self, session: &Session) -> Result<PathBuf, ExportError> {
        let path = self.logs_dir.join(format!("{}.json", log_stem(session)));
        let contents = serde_json::to_string_pretty(session)
            .map_err(|e| ExportError::Serialize(e.to_string()))?;
        atomic_write(&path, &contents)?;
        Ok(path)
    }
}
