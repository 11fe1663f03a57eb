//! Top-idea extraction from free-form synthesis text.
//!
//! The synthesis step returns unstructured text that should contain a ranked
//! list of ideas. Extraction applies an ordered list of pure per-line matcher
//! functions; the first strategy that yields at least `count` matches wins.
//! When none does, the first `count` non-empty lines are taken instead.
//! Like score validation, malformed output here is expected and never an error.

use serde::{Deserialize, Serialize};

/// A recognized extraction strategy, tried in configured order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    /// Lines starting with `n.` where n is in `[1, count]`
    Numbered,
    /// Lines starting with `*`
    Starred,
    /// Lines starting with `-`
    Bullet,
    /// Not a pattern: signals "give up and take raw non-empty lines"
    Fallback,
}

impl ExtractionStrategy {
    /// Default strategy order.
    pub fn default_order() -> Vec<ExtractionStrategy> {
        vec![
            ExtractionStrategy::Numbered,
            ExtractionStrategy::Starred,
            ExtractionStrategy::Bullet,
            ExtractionStrategy::Fallback,
        ]
    }
}

/// Extract up to `count` candidate idea strings from synthesis text.
///
/// Strategies are tried in order (`Fallback` entries are skipped as patterns);
/// the first one with at least `count` line matches returns its first `count`
/// matches in document order. Otherwise the first `count` non-empty trimmed
/// lines are returned, or fewer if the text has fewer.
pub fn extract_top_ideas(
    text: &str,
    count: usize,
    strategies: &[ExtractionStrategy],
) -> Vec<String> {
    for strategy in strategies {
        let matches: Vec<String> = match strategy {
            ExtractionStrategy::Numbered => collect(text, |line| match_numbered(line, count)),
            ExtractionStrategy::Starred => collect(text, |line| match_prefixed(line, '*')),
            ExtractionStrategy::Bullet => collect(text, |line| match_prefixed(line, '-')),
            ExtractionStrategy::Fallback => continue,
        };
        if matches.len() >= count {
            return matches.into_iter().take(count).collect();
        }
    }

    // Fallback: raw non-empty lines, trimmed
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(count)
        .map(str::to_string)
        .collect()
}

fn collect(text: &str, matcher: impl Fn(&str) -> Option<String>) -> Vec<String> {
    text.lines().filter_map(|line| matcher(line)).collect()
}

/// Match a line of the form `n. idea` where `n` lies in `[1, count]`.
///
/// The rank is parsed as a full integer, so `count == 1` never matches
/// `10.` or `11.`, and counts of 10 or more work correctly.
fn match_numbered(line: &str, count: usize) -> Option<String> {
    let trimmed = line.trim_start();
    let digits_end = trimmed.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }
    let rank: usize = trimmed[..digits_end].parse().ok()?;
    if rank < 1 || rank > count {
        return None;
    }
    let rest = trimmed[digits_end..].strip_prefix('.')?;
    let idea = rest.trim();
    if idea.is_empty() {
        return None;
    }
    Some(idea.to_string())
}

/// Match a line starting with the given marker character, returning the rest.
fn match_prefixed(line: &str, marker: char) -> Option<String> {
    let rest = line.trim_start().strip_prefix(marker)?;
    let idea = rest.trim();
    if idea.is_empty() {
        return None;
    }
    Some(idea.to_string())
}
