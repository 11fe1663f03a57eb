//! Session exporters and the per-idea file writer.
//!
//! Every artifact goes through [`atomic_write`]: the content lands in a
//! temporary file in the target directory first and is renamed into place, so
//! an interrupt mid-run never leaves a partially written, unreadable file.

mod ideas;
mod json;
mod markdown;
mod yaml;

pub use ideas::IdeaFileWriter;
pub use json::JsonExporter;
pub use markdown::MarkdownExporter;
pub use yaml::YamlExporter;

use brainstorm_domain::Session;
use chrono::DateTime;
use std::fs;
use std::io;
use std::path::Path;

/// Write `contents` to `path` atomically (temp file + rename).
pub(crate) fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Filename stem shared by all formats of one session's export.
///
/// Derived from the session's creation timestamp so every enabled exporter
/// produces the same stem: `brainstorm_2026-08-31_14-03-59`.
pub(crate) fn log_stem(session: &Session) -> String {
    let timestamp = DateTime::parse_from_rfc3339(&session.created_at)
        .map(|dt| dt.format("%Y-%m-%d_%H-%M-%S").to_string())
        .unwrap_or_else(|_| session.created_at.replace(':', "-"));
    format!("brainstorm_{timestamp}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainstorm_domain::Session;

    fn session() -> Session {
        Session::new("obj", "ctx", "cons", 1, 1, "2026-08-31T14:03:59+00:00")
    }

    #[test]
    fn stem_formats_rfc3339_timestamp() {
        assert_eq!(log_stem(&session()), "brainstorm_2026-08-31_14-03-59");
    }

    #[test]
    fn stem_sanitizes_unparsable_timestamp() {
        let mut s = session();
        s.created_at = "12:34:56".to_string();
        assert_eq!(log_stem(&s), "brainstorm_12-34-56");
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");
        atomic_write(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
