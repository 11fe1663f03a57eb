//! Historical-context window management

mod history;

pub use history::IdeaHistory;
