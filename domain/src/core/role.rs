//! Role value object identifying a pipeline stage

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named pipeline stage (Value Object)
///
/// Each role identifies one step of the brainstorming pipeline and is used
/// to look up the default model and temperature for that step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    // Cycle stages
    Creative,
    Critique,
    Defense,
    Rebuttal,
    Revision,
    Score,
    // Post-cycle stages
    Synthesis,
    // Per-idea application stages
    Plan,
    PlanCritique,
    PlanDefense,
    PlanRevision,
}

impl Role {
    /// String identifier used for configuration lookup
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Creative => "creative",
            Role::Critique => "critique",
            Role::Defense => "defense",
            Role::Rebuttal => "rebuttal",
            Role::Revision => "revision",
            Role::Score => "score",
            Role::Synthesis => "synthesis",
            Role::Plan => "plan",
            Role::PlanCritique => "plan_critique",
            Role::PlanDefense => "plan_defense",
            Role::PlanRevision => "plan_revision",
        }
    }

    /// The six roles of one brainstorming cycle, in execution order
    pub fn cycle_roles() -> [Role; 6] {
        [
            Role::Creative,
            Role::Critique,
            Role::Defense,
            Role::Rebuttal,
            Role::Revision,
            Role::Score,
        ]
    }

    /// The four roles of one per-idea application sub-pipeline, in execution order
    pub fn application_roles() -> [Role; 4] {
        [
            Role::Plan,
            Role::PlanCritique,
            Role::PlanDefense,
            Role::PlanRevision,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
