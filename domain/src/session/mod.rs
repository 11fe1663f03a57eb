//! Session entities: the in-memory record of one brainstorming run

mod entities;

pub use entities::{ApplicationLog, CycleLog, Session, SessionStatus};
