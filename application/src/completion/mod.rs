//! The resilient completion client and its usage accounting

mod client;
mod usage;

pub use client::{CompletionClient, CompletionError, CompletionOverrides};
pub use usage::{ModelUsage, UsageAccumulator, UsageStats};
