//! Orchestrator use cases

mod run_cycle;
mod run_session;

pub use run_cycle::run_cycle;
pub use run_session::{RunSession, RunSessionError};
