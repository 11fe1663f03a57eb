//! The session orchestrator: the full run from objective to exported artifacts.
//!
//! Runs N cycles, deduplicates the revision texts, synthesizes, extracts the
//! top ideas, runs the per-idea planning sub-pipelines, writes per-idea files,
//! then hands the session to every enabled exporter. Fail-fast: any completion
//! failure finalizes the session as failed and propagates after logging; there
//! is no partial-success notion at the session level, only per exporter.

use crate::completion::{CompletionClient, CompletionError};
use crate::config::SessionSettings;
use crate::ports::export::{IdeaExporter, SessionExporter};
use crate::ports::progress::{NoProgress, ProgressObserver};
use crate::progress::ProgressTracker;
use crate::use_cases::run_cycle;
use brainstorm_domain::{
    ApplicationLog, IdeaHistory, PromptTemplate, Role, Session, dedupe, extract_top_ideas,
};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// A failed session run.
///
/// Carries the session finalized as failed so callers can still inspect or
/// persist what was produced before the failure.
#[derive(Error, Debug)]
#[error("session failed: {source}")]
pub struct RunSessionError {
    #[source]
    pub source: CompletionError,
    pub session: Box<Session>,
}

/// Use case driving one complete brainstorming session
pub struct RunSession {
    client: Arc<CompletionClient>,
    settings: SessionSettings,
    exporters: Vec<Box<dyn SessionExporter>>,
    idea_exporter: Option<Box<dyn IdeaExporter>>,
    observer: Arc<dyn ProgressObserver>,
}

impl RunSession {
    pub fn new(client: Arc<CompletionClient>, settings: SessionSettings) -> Self {
        Self {
            client,
            settings,
            exporters: Vec::new(),
            idea_exporter: None,
            observer: Arc::new(NoProgress),
        }
    }

    pub fn with_exporter(mut self, exporter: Box<dyn SessionExporter>) -> Self {
        self.exporters.push(exporter);
        self
    }

    pub fn with_idea_exporter(mut self, exporter: Box<dyn IdeaExporter>) -> Self {
        self.idea_exporter = Some(exporter);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run the session to completion.
    pub async fn execute(&self) -> Result<Session, RunSessionError> {
        let params = &self.settings.params;
        let mut tracker = ProgressTracker::new(
            params.cycles,
            params.top_ideas,
            Arc::clone(&self.observer),
        );
        let mut session = Session::new(
            &params.objective,
            &params.context,
            &params.constraints,
            params.cycles,
            params.top_ideas,
            Utc::now().to_rfc3339(),
        );

        info!(
            cycles = params.cycles,
            top_ideas = params.top_ideas,
            "starting brainstorming session"
        );
        tracker.start_session();

        match self.drive(&mut session, &mut tracker).await {
            Ok(()) => {
                session.complete();
                tracker.finish();
                info!("session completed");
                Ok(session)
            }
            Err(err) => {
                error!(error = %err, "session failed");
                session.fail(err.to_string());
                Err(RunSessionError {
                    source: err,
                    session: Box::new(session),
                })
            }
        }
    }

    async fn drive(
        &self,
        session: &mut Session,
        tracker: &mut ProgressTracker,
    ) -> Result<(), CompletionError> {
        let params = &self.settings.params;
        let mut history = IdeaHistory::new(self.settings.max_history_chars);

        for cycle in 1..=params.cycles {
            let log = run_cycle(
                &self.client,
                tracker,
                params,
                &self.settings.score_schema,
                &mut history,
                cycle,
            )
            .await?;
            session.push_cycle(log);
        }

        // Synthesis over the deduplicated revisions
        tracker.start_synthesis();
        let revisions: Vec<String> = session.cycles.iter().map(|c| c.revision.clone()).collect();
        let unique = dedupe(&revisions);
        info!(
            revisions = revisions.len(),
            unique = unique.len(),
            "synthesizing"
        );
        let synthesis = self
            .client
            .complete(
                Role::Synthesis,
                &PromptTemplate::synthesis(&unique, params.top_ideas),
            )
            .await?;
        tracker.complete_step();
        session.synthesis = synthesis;

        // Extraction; the step budget is revised once if the count differs
        let ideas = extract_top_ideas(
            &session.synthesis,
            params.top_ideas,
            &self.settings.extraction_strategies,
        );
        if ideas.len() != params.top_ideas {
            warn!(
                requested = params.top_ideas,
                extracted = ideas.len(),
                "extracted idea count differs from configuration"
            );
            tracker.revise_idea_count(ideas.len());
        }

        for (idx, idea) in ideas.iter().enumerate() {
            let rank = idx + 1;
            tracker.start_idea(rank, idea);
            let log = self.run_application(tracker, rank, idea).await?;
            session.push_application(log);
        }

        // One artifact per top idea; failures are logged, never fatal
        if let Some(writer) = &self.idea_exporter {
            for (idx, log) in session.applications.iter().enumerate() {
                match writer.write_idea(idx + 1, log) {
                    Ok(path) => info!(path = %path.display(), "idea file written"),
                    Err(err) => error!(rank = idx + 1, error = %err, "idea file export failed"),
                }
            }
        }

        // Each exporter's failure is isolated from the others
        tracker.start_export();
        for exporter in &self.exporters {
            match exporter.export(session) {
                Ok(path) => {
                    info!(format = exporter.format(), path = %path.display(), "session exported")
                }
                Err(err) => {
                    error!(format = exporter.format(), error = %err, "export failed")
                }
            }
        }
        tracker.complete_step();

        Ok(())
    }

    /// The 4-step planning sub-pipeline for one selected idea.
    async fn run_application(
        &self,
        tracker: &mut ProgressTracker,
        rank: usize,
        idea: &str,
    ) -> Result<ApplicationLog, CompletionError> {
        info!(rank, "processing selected idea");

        tracker.start_idea_step(rank, Role::Plan);
        let plan = self
            .client
            .complete(Role::Plan, &PromptTemplate::plan(idea))
            .await?;
        tracker.complete_step();

        tracker.start_idea_step(rank, Role::PlanCritique);
        let critique = self
            .client
            .complete(Role::PlanCritique, &PromptTemplate::plan_critique(&plan))
            .await?;
        tracker.complete_step();

        tracker.start_idea_step(rank, Role::PlanDefense);
        let defense = self
            .client
            .complete(
                Role::PlanDefense,
                &PromptTemplate::plan_defense(&plan, &critique),
            )
            .await?;
        tracker.complete_step();

        tracker.start_idea_step(rank, Role::PlanRevision);
        let revised_plan = self
            .client
            .complete(
                Role::PlanRevision,
                &PromptTemplate::plan_revision(&plan, &critique),
            )
            .await?;
        tracker.complete_step();

        Ok(ApplicationLog {
            idea: idea.to_string(),
            initial_plan: plan,
            critique,
            defense,
            revised_plan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RetryPolicy, RoleSettings, SessionParams};
    use crate::ports::backend::{
        BackendError, CompletionBackend, CompletionRequest, CompletionResponse,
    };
    use crate::ports::export::ExportError;
    use async_trait::async_trait;
    use brainstorm_domain::{PricingTable, SessionStatus};
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend replying with a scripted response per call, in order
    struct ScriptedBackend {
        responses: Mutex<Vec<Result<String, BackendError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<Result<String, BackendError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, BackendError> {
            let index = self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            if index >= responses.len() {
                return Err(BackendError::Other("script exhausted".to_string()));
            }
            match std::mem::replace(&mut responses[index], Ok(String::new())) {
                Ok(text) => Ok(CompletionResponse {
                    text,
                    prompt_tokens: 100,
                    completion_tokens: 50,
                }),
                Err(err) => Err(err),
            }
        }
    }

    /// Exporter recording the sessions it was handed
    struct RecordingExporter {
        sessions: Mutex<Vec<Session>>,
    }

    impl SessionExporter for RecordingExporter {
        fn format(&self) -> &'static str {
            "recording"
        }

        fn export(&self, session: &Session) -> Result<PathBuf, ExportError> {
            self.sessions.lock().unwrap().push(session.clone());
            Ok(PathBuf::from("/dev/null"))
        }
    }

    /// Observer recording the final step accounting
    #[derive(Default)]
    struct RecordingObserver {
        finished: Mutex<Option<(usize, usize)>>,
        revised_total: Mutex<Option<usize>>,
    }

    impl ProgressObserver for RecordingObserver {
        fn on_total_revised(&self, total_steps: usize) {
            *self.revised_total.lock().unwrap() = Some(total_steps);
        }

        fn on_finished(&self, completed_steps: usize, total_steps: usize) {
            *self.finished.lock().unwrap() = Some((completed_steps, total_steps));
        }
    }

    fn settings(cycles: usize, top_ideas: usize) -> SessionSettings {
        SessionSettings::new(SessionParams {
            objective: "X".to_string(),
            context: "ctx".to_string(),
            constraints: "none".to_string(),
            cycles,
            top_ideas,
        })
    }

    fn client(backend: ScriptedBackend) -> Arc<CompletionClient> {
        Arc::new(CompletionClient::new(
            Arc::new(backend),
            RoleSettings::default(),
            PricingTable::default(),
            RetryPolicy {
                max_retries: 1,
                delay_base: 2.0,
            },
        ))
    }

    /// One cycle, then synthesis listing three ideas, then plans for each.
    fn one_cycle_script(synthesis: &str, idea_steps: usize) -> Vec<Result<String, BackendError>> {
        let mut script: Vec<Result<String, BackendError>> = vec![
            Ok("a bold idea".to_string()),
            Ok("too vague".to_string()),
            Ok("actually precise".to_string()),
            Ok("still vague".to_string()),
            Ok("a bolder idea".to_string()),
            Ok(r#"{"impact": 8, "feasibility": 7, "originality": 9, "clarity": 6}"#.to_string()),
            Ok(synthesis.to_string()),
        ];
        for i in 0..idea_steps {
            script.push(Ok(format!("plan output {i}")));
        }
        script
    }

    #[tokio::test]
    async fn full_session_extracts_top_ideas_and_completes() {
        let backend =
            ScriptedBackend::new(one_cycle_script("1. Idea A\n2. Idea B\n3. Idea C", 8));
        let observer = Arc::new(RecordingObserver::default());
        let exporter = RecordingExporter {
            sessions: Mutex::new(Vec::new()),
        };

        let use_case = RunSession::new(client(backend), settings(1, 2))
            .with_exporter(Box::new(exporter))
            .with_observer(Arc::clone(&observer) as Arc<dyn ProgressObserver>);

        let session = use_case.execute().await.unwrap();

        assert_eq!(session.status, SessionStatus::Completed);
        assert_eq!(session.cycles.len(), 1);
        assert_eq!(session.cycles[0].creation, "a bold idea");
        assert_eq!(session.cycles[0].score.total, 30);
        assert_eq!(session.applications.len(), 2);
        assert_eq!(session.applications[0].idea, "Idea A");
        assert_eq!(session.applications[1].idea, "Idea B");

        // 6 cycle steps + synthesis + 2x4 idea steps + export
        let (completed, total) = observer.finished.lock().unwrap().unwrap();
        assert_eq!(completed, total);
        assert_eq!(total, 6 + 1 + 8 + 1);
    }

    #[tokio::test]
    async fn step_budget_revised_when_extraction_finds_fewer_ideas() {
        // Synthesis yields a single usable line; fallback extraction returns 1
        let backend = ScriptedBackend::new(one_cycle_script("only one idea here", 4));
        let observer = Arc::new(RecordingObserver::default());

        let use_case = RunSession::new(client(backend), settings(1, 3))
            .with_observer(Arc::clone(&observer) as Arc<dyn ProgressObserver>);

        let session = use_case.execute().await.unwrap();

        assert_eq!(session.applications.len(), 1);
        assert_eq!(
            observer.revised_total.lock().unwrap().unwrap(),
            6 + 1 + 4 + 1
        );
        let (completed, total) = observer.finished.lock().unwrap().unwrap();
        assert_eq!(completed, total);
    }

    #[tokio::test]
    async fn failure_finalizes_session_as_failed_and_propagates() {
        let backend = ScriptedBackend::new(vec![
            Ok("a bold idea".to_string()),
            Err(BackendError::Other("contract violation".to_string())),
        ]);

        let use_case = RunSession::new(client(backend), settings(1, 2));
        let err = use_case.execute().await.unwrap_err();

        assert!(matches!(err.source, CompletionError::Unexpected { .. }));
        assert_eq!(err.session.status, SessionStatus::Failed);
        assert!(err.session.error.is_some());
        // The first cycle never finished, nothing was logged
        assert!(err.session.cycles.is_empty());
    }

    #[tokio::test]
    async fn duplicate_revisions_are_deduplicated_before_synthesis() {
        // Two cycles producing identical revisions; synthesis then sees one
        let mut script: Vec<Result<String, BackendError>> = Vec::new();
        for _ in 0..2 {
            script.extend([
                Ok("seed".to_string()),
                Ok("crit".to_string()),
                Ok("def".to_string()),
                Ok("reb".to_string()),
                Ok("same revision".to_string()),
                Ok("{}".to_string()),
            ]);
        }
        script.push(Ok("1. Idea A".to_string()));
        script.extend((0..4).map(|i| Ok(format!("plan {i}"))));

        let backend = ScriptedBackend::new(script);
        let use_case = RunSession::new(client(backend), settings(2, 1));
        let session = use_case.execute().await.unwrap();

        assert_eq!(session.cycles.len(), 2);
        // Malformed score fell back: 6 x 4 keys
        assert_eq!(session.cycles[0].score.total, 24);
        assert_eq!(session.applications.len(), 1);
        assert_eq!(session.applications[0].idea, "Idea A");
    }
}
