//! Bounded history of prior creative outputs.
//!
//! Each cycle's creation text is appended here and the concatenated history is
//! injected into the next creative prompt. Without a bound, long sessions push
//! the objective out of the model's effective attention window, so the history
//! carries a character budget and evicts oldest entries first.

use serde::{Deserialize, Serialize};

/// Ordered sequence of prior creation texts under a character budget
///
/// Invariant: after [`trim`](IdeaHistory::trim), the joined serialization is
/// within `max_chars`, or the history holds at most one entry (a single
/// over-budget entry cannot shrink further and is kept as-is).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaHistory {
    entries: Vec<String>,
    max_chars: usize,
}

impl IdeaHistory {
    pub fn new(max_chars: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_chars,
        }
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// All entries joined with a newline separator, oldest first.
    pub fn joined(&self) -> String {
        self.entries.join("\n")
    }

    /// Character length of the joined serialization.
    fn joined_len(&self) -> usize {
        if self.entries.is_empty() {
            return 0;
        }
        let chars: usize = self.entries.iter().map(|e| e.chars().count()).sum();
        chars + self.entries.len() - 1
    }

    /// Evict oldest entries (FIFO) until the joined length fits the budget.
    ///
    /// Terminates when the budget is satisfied or the history is down to
    /// nothing; a single over-budget entry is left in place.
    pub fn trim(&mut self) {
        while self.joined_len() > self.max_chars && !self.entries.is_empty() {
            self.entries.remove(0);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}
