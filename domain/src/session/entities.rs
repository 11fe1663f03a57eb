//! Session domain entities

use crate::scoring::ScoreRecord;
use serde::{Deserialize, Serialize};

/// Terminal status of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Running,
    Completed,
    Failed,
}

/// The six role outputs of one brainstorming cycle (Entity)
///
/// Created once per cycle by the cycle orchestrator and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleLog {
    /// 1-based cycle index
    pub cycle: usize,
    pub creation: String,
    pub critique: String,
    pub defense: String,
    pub rebuttal: String,
    pub revision: String,
    pub score: ScoreRecord,
}

/// The detailed planning record for one selected idea (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationLog {
    pub idea: String,
    pub initial_plan: String,
    pub critique: String,
    pub defense: String,
    pub revised_plan: String,
}

/// One complete brainstorming run, from objective to exported artifacts (Entity)
///
/// Owned and mutated exclusively by the session orchestrator; handed wholesale
/// to exporters once finalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub objective: String,
    pub context: String,
    pub constraints: String,
    pub cycles_requested: usize,
    pub top_ideas_requested: usize,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    pub cycles: Vec<CycleLog>,
    pub synthesis: String,
    pub applications: Vec<ApplicationLog>,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Session {
    pub fn new(
        objective: impl Into<String>,
        context: impl Into<String>,
        constraints: impl Into<String>,
        cycles_requested: usize,
        top_ideas_requested: usize,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            objective: objective.into(),
            context: context.into(),
            constraints: constraints.into(),
            cycles_requested,
            top_ideas_requested,
            created_at: created_at.into(),
            cycles: Vec::new(),
            synthesis: String::new(),
            applications: Vec::new(),
            status: SessionStatus::Running,
            error: None,
        }
    }

    pub fn push_cycle(&mut self, log: CycleLog) {
        self.cycles.push(log);
    }

    pub fn push_application(&mut self, log: ApplicationLog) {
        self.applications.push(log);
    }

    /// Finalize the session as successfully completed.
    pub fn complete(&mut self) {
        self.status = SessionStatus::Completed;
        self.error = None;
    }

    /// Finalize the session as failed with the captured error message.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = SessionStatus::Failed;
        self.error = Some(message.into());
    }

    pub fn is_finalized(&self) -> bool {
        self.status != SessionStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session::new("objective", "context", "constraints", 2, 3, "2026-01-01T00:00:00Z")
    }

    #[test]
    fn new_session_is_running() {
        let session = sample_session();
        assert_eq!(session.status, SessionStatus::Running);
        assert!(!session.is_finalized());
        assert!(session.cycles.is_empty());
        assert!(session.applications.is_empty());
    }

    #[test]
    fn complete_clears_error() {
        let mut session = sample_session();
        session.error = Some("stale".to_string());
        session.complete();
        assert_eq!(session.status, SessionStatus::Completed);
        assert!(session.error.is_none());
        assert!(session.is_finalized());
    }

    #[test]
    fn fail_records_message() {
        let mut session = sample_session();
        session.fail("backend exploded");
        assert_eq!(session.status, SessionStatus::Failed);
        assert_eq!(session.error.as_deref(), Some("backend exploded"));
    }

    #[test]
    fn serde_omits_absent_error() {
        let session = sample_session();
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("\"error\""));
        assert!(json.contains("\"running\""));
    }
}
