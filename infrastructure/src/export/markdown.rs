//! Markdown report exporter

use super::{atomic_write, log_stem};
use brainstorm_application::{ExportError, SessionExporter};
use brainstorm_domain::Session;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Writes the session as a human-readable Markdown report
pub struct MarkdownExporter {
    logs_dir: PathBuf,
}

impl MarkdownExporter {
    pub fn new(logs_dir: impl AsRef<Path>) -> Self {
        Self {
            logs_dir: logs_dir.as_ref().to_path_buf(),
        }
    }

    fn render(session: &Session) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Brainstorming Session\n");
        let _ = writeln!(out, "- **Objective**: {}", session.objective);
        let _ = writeln!(out, "- **Context**: {}", session.context);
        let _ = writeln!(out, "- **Constraints**: {}", session.constraints);
        let _ = writeln!(out, "- **Date**: {}", session.created_at);
        let _ = writeln!(out, "- **Status**: {:?}\n", session.status);

        for cycle in &session.cycles {
            let _ = writeln!(out, "## Cycle {}\n", cycle.cycle);
            let _ = writeln!(out, "### Creation\n\n{}\n", cycle.creation);
            let _ = writeln!(out, "### Critique\n\n{}\n", cycle.critique);
            let _ = writeln!(out, "### Defense\n\n{}\n", cycle.defense);
            let _ = writeln!(out, "### Rebuttal\n\n{}\n", cycle.rebuttal);
            let _ = writeln!(out, "### Revision\n\n{}\n", cycle.revision);
            let _ = writeln!(out, "### Score\n");
            for (criterion, value) in &cycle.score.criteria {
                let _ = writeln!(out, "- {criterion}: {value}");
            }
            let _ = writeln!(out, "- **total**: {}\n", cycle.score.total);
        }

        let _ = writeln!(out, "## Final Synthesis\n\n{}\n", session.synthesis);

        for (idx, app) in session.applications.iter().enumerate() {
            let _ = writeln!(out, "## Application Plan {}\n", idx + 1);
            let _ = writeln!(out, "**Idea**: {}\n", app.idea);
            let _ = writeln!(out, "### Initial Plan\n\n{}\n", app.initial_plan);
            let _ = writeln!(out, "### Critique\n\n{}\n", app.critique);
            let _ = writeln!(out, "### Defense\n\n{}\n", app.defense);
            let _ = writeln!(out, "### Revised Plan\n\n{}\n", app.revised_plan);
        }

        out
    }
}

impl SessionExporter for MarkdownExporter {
    fn format(&self) -> &'static str {
        "markdown"
    }

    fn export(&self, session: &Session) -> Result<PathBuf, ExportError> {
        let path = self.logs_dir.join(format!("{}.md", log_stem(session)));
        atomic_write(&path, &Self::render(session))?;
        Ok(path)
    }
}
