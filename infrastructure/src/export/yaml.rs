//! YAML session exporter

use super::{atomic_write, log_stem};
use brainstorm_application::{ExportError, SessionExporter};
use brainstorm_domain::Session;
use std::path::{Path, PathBuf};

/// Writes the full session record as YAML
pub struct YamlExporter {
    logs_dir: PathBuf,
}

impl YamlExporter {
    pub fn new(logs_dir: impl AsRef<Path>) -> Self {
        Self {
            logs_dir: logs_dir.as_ref().to_path_buf(),
        }
    }
}

impl SessionExporter for YamlExporter {
    fn format(&self) -> &'static str {
        "yaml"
    }

    fn export(&self, session: &Session) -> Result<PathBuf, ExportError> {
        let path = self.logs_dir.join(format!("{}.yaml", log_stem(session)));
        let contents = serde_yaml::to_string(session)
            .map_err(|e| ExportError::Serialize(e.to_string()))?;
        atomic_write(&path, &contents)?;
        Ok(path)
    }
}
