//! One brainstorming cycle: six strictly sequential role steps.
//!
//! `Creative → Critique → Defense → Rebuttal → Revision → Score`, no branching.
//! The critique feeds both the defense and the revision; the defense feeds the
//! rebuttal; the creation is appended to the history before the cycle
//! completes. Retries belong to the completion client beneath each step.

use crate::completion::{CompletionClient, CompletionError};
use crate::config::SessionParams;
use crate::progress::ProgressTracker;
use brainstorm_domain::{
    CycleLog, IdeaHistory, PromptTemplate, Role, ScoreSchema, validate_score,
};
use tracing::{debug, info};

/// Run cycle `cycle` (1-based), appending the creation to `history`.
pub async fn run_cycle(
    client: &CompletionClient,
    tracker: &mut ProgressTracker,
    params: &SessionParams,
    score_schema: &ScoreSchema,
    history: &mut IdeaHistory,
    cycle: usize,
) -> Result<CycleLog, CompletionError> {
    info!(cycle, "starting brainstorming cycle");

    // The history window is trimmed before it is injected into the prompt
    history.trim();
    debug!(cycle, history_entries = history.len(), "history trimmed");

    tracker.start_cycle_step(cycle, Role::Creative);
    let creation = client
        .complete(
            Role::Creative,
            &PromptTemplate::creative(
                &params.objective,
                &params.context,
                &params.constraints,
                &history.joined(),
            ),
        )
        .await?;
    tracker.complete_step();

    history.push(creation.clone());

    tracker.start_cycle_step(cycle, Role::Critique);
    let critique = client
        .complete(Role::Critique, &PromptTemplate::critique(&creation))
        .await?;
    tracker.complete_step();

    tracker.start_cycle_step(cycle, Role::Defense);
    let defense = client
        .complete(Role::Defense, &PromptTemplate::defense(&creation, &critique))
        .await?;
    tracker.complete_step();

    tracker.start_cycle_step(cycle, Role::Rebuttal);
    let rebuttal = client
        .complete(Role::Rebuttal, &PromptTemplate::rebuttal(&defense, &creation))
        .await?;
    tracker.complete_step();

    tracker.start_cycle_step(cycle, Role::Revision);
    let revision = client
        .complete(Role::Revision, &PromptTemplate::revision(&creation, &critique))
        .await?;
    tracker.complete_step();

    tracker.start_cycle_step(cycle, Role::Score);
    let raw_score = client
        .complete(Role::Score, &PromptTemplate::score(&revision))
        .await?;
    let score = validate_score(&raw_score, score_schema);
    tracker.complete_step();

    info!(cycle, total = score.total, "cycle finished");

    Ok(CycleLog {
        cycle,
        creation,
        critique,
        defense,
        rebuttal,
        revision,
        score,
    })
}
