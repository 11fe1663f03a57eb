//! Pipeline progress accounting

mod tracker;

pub use tracker::{ProgressPhase, ProgressTracker, STEPS_PER_CYCLE, STEPS_PER_IDEA};
