//! Progress-tracking state machine.
//!
//! Counts discrete pipeline steps against a deterministic budget:
//! `cycles × 6 + 1 (synthesis) + ideas × 4 + 1 (export)`. The completed count
//! only ever increases; the total may be revised exactly once, when idea
//! extraction yields a different count than configured. A completed count
//! exceeding the total is a mis-accounted phase transition, i.e. a programming
//! error, and is caught by `debug_assert` rather than handled at runtime.

use crate::ports::progress::ProgressObserver;
use brainstorm_domain::Role;
use std::sync::Arc;
use tracing::debug;

/// Steps per brainstorming cycle (creative, critique, defense, rebuttal,
/// revision, score)
pub const STEPS_PER_CYCLE: usize = 6;

/// Steps per selected idea (plan, plan critique, plan defense, plan revision)
pub const STEPS_PER_IDEA: usize = 4;

/// What the pipeline is currently doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressPhase {
    Idle,
    Cycle { cycle: usize, role: Role },
    Synthesizing,
    Idea { rank: usize, role: Role },
    Exporting,
    Finished,
}

impl ProgressPhase {
    /// Human-readable label for display.
    pub fn label(&self) -> String {
        match self {
            ProgressPhase::Idle => "Waiting".to_string(),
            ProgressPhase::Cycle { cycle, role } => format!("Cycle {cycle} - {role}"),
            ProgressPhase::Synthesizing => "Synthesis".to_string(),
            ProgressPhase::Idea { rank, role } => format!("Idea {rank} - {role}"),
            ProgressPhase::Exporting => "Export".to_string(),
            ProgressPhase::Finished => "Finished".to_string(),
        }
    }
}

/// Step accounting for one session run
pub struct ProgressTracker {
    total_cycles: usize,
    idea_count: usize,
    total_steps: usize,
    completed_steps: usize,
    phase: ProgressPhase,
    idea_count_revised: bool,
    observer: Arc<dyn ProgressObserver>,
}

impl ProgressTracker {
    pub fn new(cycles: usize, top_ideas: usize, observer: Arc<dyn ProgressObserver>) -> Self {
        Self {
            total_cycles: cycles,
            idea_count: top_ideas,
            total_steps: Self::budget(cycles, top_ideas),
            completed_steps: 0,
            phase: ProgressPhase::Idle,
            idea_count_revised: false,
            observer,
        }
    }

    /// Deterministic step budget for a pipeline shape.
    pub fn budget(cycles: usize, top_ideas: usize) -> usize {
        cycles * STEPS_PER_CYCLE + 1 + top_ideas * STEPS_PER_IDEA + 1
    }

    pub fn start_session(&self) {
        self.observer
            .on_session_start(self.total_steps, self.total_cycles, self.idea_count);
    }

    pub fn start_cycle_step(&mut self, cycle: usize, role: Role) {
        self.set_phase(ProgressPhase::Cycle { cycle, role });
    }

    pub fn start_synthesis(&mut self) {
        self.set_phase(ProgressPhase::Synthesizing);
    }

    pub fn start_idea(&mut self, rank: usize, idea: &str) {
        let preview: String = idea.chars().take(50).collect();
        self.observer.on_idea_start(rank, &preview);
    }

    pub fn start_idea_step(&mut self, rank: usize, role: Role) {
        self.set_phase(ProgressPhase::Idea { rank, role });
    }

    pub fn start_export(&mut self) {
        self.set_phase(ProgressPhase::Exporting);
    }

    /// Mark the in-flight step as completed.
    pub fn complete_step(&mut self) {
        self.completed_steps += 1;
        debug_assert!(
            self.completed_steps <= self.total_steps,
            "completed {} steps out of a budget of {}",
            self.completed_steps,
            self.total_steps
        );
        self.observer
            .on_step_complete(self.completed_steps, self.total_steps);
    }

    /// Revise the idea-related portion of the budget after extraction.
    ///
    /// Fired at most once per session; subsequent calls are ignored.
    pub fn revise_idea_count(&mut self, count: usize) {
        if self.idea_count_revised || count == self.idea_count {
            return;
        }
        debug!(
            from = self.idea_count,
            to = count,
            "revising idea step budget"
        );
        self.total_steps =
            self.total_steps - self.idea_count * STEPS_PER_IDEA + count * STEPS_PER_IDEA;
        self.idea_count = count;
        self.idea_count_revised = true;
        debug_assert!(self.completed_steps <= self.total_steps);
        self.observer.on_total_revised(self.total_steps);
    }

    /// Enter the terminal state.
    ///
    /// At this point `completed_steps == total_steps` must hold; a mismatch is
    /// a bookkeeping bug in an orchestrator, surfaced by assertions in tests
    /// via [`is_balanced`](Self::is_balanced).
    pub fn finish(&mut self) {
        self.phase = ProgressPhase::Finished;
        debug_assert!(self.is_balanced(), "unbalanced step accounting at finish");
        self.observer
            .on_finished(self.completed_steps, self.total_steps);
    }

    pub fn completed_steps(&self) -> usize {
        self.completed_steps
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn phase(&self) -> &ProgressPhase {
        &self.phase
    }

    pub fn is_balanced(&self) -> bool {
        self.completed_steps == self.total_steps
    }

    fn set_phase(&mut self, phase: ProgressPhase) {
        self.phase = phase;
        self.observer
            .on_phase_change(&self.phase.label(), self.completed_steps, self.total_steps);
    }
}
