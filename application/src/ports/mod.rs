//! Ports implemented by infrastructure and presentation adapters

pub mod backend;
pub mod export;
pub mod progress;
