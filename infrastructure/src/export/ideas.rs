//! Per-idea project file writer

use super::atomic_write;
use brainstorm_application::{ExportError, IdeaExporter};
use brainstorm_domain::{ApplicationLog, slugify};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const SLUG_MAX_LEN: usize = 40;

/// Writes each selected idea as a standalone `PROJECT_NN_slug.md` document
pub struct IdeaFileWriter {
    exports_dir: PathBuf,
}

impl IdeaFileWriter {
    pub fn new(exports_dir: impl AsRef<Path>) -> Self {
        Self {
            exports_dir: exports_dir.as_ref().to_path_buf(),
        }
    }

    fn file_name(rank: usize, log: &ApplicationLog) -> String {
        let slug = slugify(&log.idea, SLUG_MAX_LEN);
        if slug.is_empty() {
            format!("PROJECT_{rank:02}.md")
        } else {
            format!("PROJECT_{rank:02}_{slug}.md")
        }
    }

    fn render(rank: usize, log: &ApplicationLog) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Project {rank}: {}\n", log.idea);
        let _ = writeln!(out, "## Initial Plan\n\n{}\n", log.initial_plan);
        let _ = writeln!(out, "## Critique\n\n{}\n", log.critique);
        let _ = writeln!(out, "## Defense\n\n{}\n", log.defense);
        let _ = writeln!(out, "## Revised Plan\n\n{}\n", log.revised_plan);
        out
    }
}

impl IdeaExporter for IdeaFileWriter {
    fn write_idea(&self, rank: usize, log: &ApplicationLog) -> Result<PathBuf, ExportError> {
        let path = self.exports_dir.join(Self::file_name(rank, log));
        atomic_write(&path, &Self::render(rank, log))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log(idea: &str) -> ApplicationLog {
        ApplicationLog {
            idea: idea.to_string(),
            initial_plan: "plan".to_string(),
            critique: "critique".to_string(),
            defense: "defense".to_string(),
            revised_plan: "revised".to_string(),
        }
    }

    #[test]
    fn file_name_pads_rank_and_slugs_idea() {
        let log = sample_log("Smart compost bins (v2)");
        assert_eq!(
            IdeaFileWriter::file_name(3, &log),
            "PROJECT_03_Smart_compost_bins__v2.md"
        );
    }

    #[test]
    fn file_name_without_usable_slug() {
        let log = sample_log("???");
        assert_eq!(IdeaFileWriter::file_name(1, &log), "PROJECT_01.md");
    }

    #[test]
    fn writes_document_with_all_sections() {
        let dir = tempfile::tempdir().unwrap();
        let log = sample_log("Idea A");
        let path = IdeaFileWriter::new(dir.path()).write_idea(1, &log).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("# Project 1: Idea A"));
        assert!(body.contains("## Revised Plan"));
        assert!(body.contains("revised"));
    }
}
