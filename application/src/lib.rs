//! Application layer for brainstorm-ai
//!
//! Use cases (the cycle and session orchestrators), the completion client with
//! retry/backoff and usage accounting, the progress tracker, and the ports
//! implemented by infrastructure and presentation adapters.

pub mod completion;
pub mod config;
pub mod ports;
pub mod progress;
pub mod use_cases;

pub use completion::{CompletionClient, CompletionError, CompletionOverrides};
pub use completion::{ModelUsage, UsageAccumulator, UsageStats};
pub use config::{RetryPolicy, RoleSettings, SessionParams, SessionSettings};
pub use ports::backend::{BackendError, CompletionBackend, CompletionRequest, CompletionResponse};
pub use ports::export::{ExportError, IdeaExporter, SessionExporter};
pub use ports::progress::{NoProgress, ProgressObserver};
pub use progress::{ProgressPhase, ProgressTracker};
pub use use_cases::{RunSession, RunSessionError, run_cycle};
