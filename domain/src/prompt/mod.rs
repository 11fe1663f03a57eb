//! Prompt templates for each pipeline role

mod template;

pub use template::PromptTemplate;
