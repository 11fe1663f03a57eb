//! Progress notification port
//!
//! The [`ProgressTracker`](crate::progress::ProgressTracker) does the step
//! accounting; this port is how the presentation layer hears about it
//! (console progress bar, plain text, etc.).

/// Callback for progress updates during a brainstorming session
///
/// All methods have empty default bodies so implementations only override
/// what they display.
pub trait ProgressObserver: Send + Sync {
    /// Called once at session start with the computed step budget.
    fn on_session_start(&self, _total_steps: usize, _cycles: usize, _ideas: usize) {}

    /// Called whenever the current phase label changes.
    fn on_phase_change(&self, _label: &str, _completed_steps: usize, _total_steps: usize) {}

    /// Called after each discrete pipeline step completes.
    fn on_step_complete(&self, _completed_steps: usize, _total_steps: usize) {}

    /// Called when idea extraction revises the total step budget.
    fn on_total_revised(&self, _total_steps: usize) {}

    /// Called when the per-idea sub-pipeline for one idea starts.
    fn on_idea_start(&self, _rank: usize, _preview: &str) {}

    /// Called once when the session reaches its terminal state.
    fn on_finished(&self, _completed_steps: usize, _total_steps: usize) {}
}

/// No-op observer for tests and quiet mode
pub struct NoProgress;

impl ProgressObserver for NoProgress {}
