//! Domain layer for brainstorm-ai
//!
//! Pure business logic with no I/O: session entities, score validation,
//! idea extraction, the history window, pricing math, and prompt templates.

pub mod context;
pub mod core;
pub mod extraction;
pub mod prompt;
pub mod scoring;
pub mod session;
pub mod util;

pub use context::IdeaHistory;
pub use core::pricing::{ModelPricing, PricingTable, SessionEstimate, estimate_tokens};
pub use core::role::Role;
pub use extraction::{ExtractionStrategy, extract_top_ideas};
pub use prompt::PromptTemplate;
pub use scoring::{ScoreRecord, ScoreSchema, validate_score};
pub use session::{ApplicationLog, CycleLog, Session, SessionStatus};
pub use util::{dedupe, slugify};
