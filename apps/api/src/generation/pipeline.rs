//! Pipeline Orchestrator — runs one generation request end to end.
//!
//! Flow: (profile ∥ history) → create job application → compose request →
//!       generate → split → attach resume → attach cover letter.
//!
//! Any stage failure stops the run immediately; nothing is retried. A failure
//! after the job application exists leaves it in place (no compensation), and
//! the error reports its id so callers can see which application was left.

use std::fmt;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::errors::{envelope, AppError};
use crate::generation::client::TextGenerator;
use crate::generation::composer::{compose, GenerationSettings};
use crate::generation::documents::DocumentAttacher;
use crate::generation::experience::ExperienceReader;
use crate::generation::job_application::JobApplicationWriter;
use crate::generation::profile::ProfileReader;
use crate::generation::splitter::split;
use crate::models::job_application::{DocumentKind, JobPosting};
use crate::storage::{DocumentStore, ExperienceStore, JobApplicationStore, ProfileStore};

// ────────────────────────────────────────────────────────────────────────────
// States and failures
// ────────────────────────────────────────────────────────────────────────────

/// The step a run was executing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchProfileAndHistory,
    CreateApplication,
    Generate,
    Split,
    AttachResume,
    AttachCoverLetter,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::FetchProfileAndHistory => "fetch_profile_and_history",
            Stage::CreateApplication => "create_application",
            Stage::Generate => "generate",
            Stage::Split => "split",
            Stage::AttachResume => "attach_resume",
            Stage::AttachCoverLetter => "attach_cover_letter",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    Start,
    ProfileAndHistoryFetched,
    ApplicationCreated,
    RequestComposed,
    Generated,
    Split,
    ResumeAttached,
    /// Terminal success.
    CoverLetterAttached,
    Failed { stage: Stage, reason: String },
}

/// A failed run: the originating stage plus the underlying error.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    /// Set once the job application for this run exists.
    pub job_application_id: Option<Uuid>,
    #[source]
    pub source: AppError,
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let mut extra = Map::new();
        extra.insert(
            "stage".to_string(),
            Value::String(self.stage.as_str().to_string()),
        );
        if let Some(id) = self.job_application_id {
            extra.insert("jobAppId".to_string(), Value::String(id.to_string()));
        }
        envelope(self.source.parts(), extra)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inputs and outputs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GenerationInput {
    pub posting: JobPosting,
    pub custom_prompt: Option<String>,
    pub settings: GenerationSettings,
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub job_application_id: Uuid,
    pub resume: String,
    pub cover_letter: String,
}

/// Tracks the state of one run and logs every transition.
struct Run {
    user_id: Uuid,
    state: PipelineState,
    job_application_id: Option<Uuid>,
}

impl Run {
    fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            state: PipelineState::Start,
            job_application_id: None,
        }
    }

    fn advance(&mut self, next: PipelineState) {
        debug!(
            "Pipeline for user {}: {:?} -> {:?}",
            self.user_id, self.state, next
        );
        self.state = next;
    }

    fn fail(&mut self, stage: Stage, source: AppError) -> PipelineError {
        let reason = source.to_string();
        match &source {
            AppError::Validation(_)
            | AppError::NoExperience
            | AppError::NotFound(_)
            | AppError::NotFoundOrForbidden(_) => warn!(
                "Pipeline for user {} failed at {stage} (job application {:?}): {reason}",
                self.user_id, self.job_application_id
            ),
            _ => error!(
                "Pipeline for user {} failed at {stage} (job application {:?}): {reason}",
                self.user_id, self.job_application_id
            ),
        }
        self.advance(PipelineState::Failed { stage, reason });

        PipelineError {
            stage,
            job_application_id: self.job_application_id,
            source,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

pub struct GenerationPipeline {
    profiles: ProfileReader,
    experiences: ExperienceReader,
    applications: JobApplicationWriter,
    generator: Arc<dyn TextGenerator>,
    attacher: DocumentAttacher,
}

impl GenerationPipeline {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        experiences: Arc<dyn ExperienceStore>,
        applications: Arc<dyn JobApplicationStore>,
        documents: Arc<dyn DocumentStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            profiles: ProfileReader::new(profiles),
            experiences: ExperienceReader::new(experiences),
            applications: JobApplicationWriter::new(applications.clone()),
            generator,
            attacher: DocumentAttacher::new(applications, documents),
        }
    }

    /// Runs the full pipeline for the authenticated `user_id`.
    pub async fn run(
        &self,
        user_id: Uuid,
        input: GenerationInput,
    ) -> Result<GenerationOutcome, PipelineError> {
        let mut run = Run::new(user_id);

        // The only concurrent step: two independent reads
        let (profile, history) = tokio::try_join!(
            self.profiles.fetch(user_id),
            self.experiences.fetch(user_id)
        )
        .map_err(|e| run.fail(Stage::FetchProfileAndHistory, e))?;
        run.advance(PipelineState::ProfileAndHistoryFetched);

        let application = self
            .applications
            .create(user_id, &input.posting)
            .await
            .map_err(|e| run.fail(Stage::CreateApplication, e))?;
        let job_application_id = application.id();
        run.job_application_id = Some(job_application_id);
        run.advance(PipelineState::ApplicationCreated);

        let payload = compose(
            &profile,
            &history.employments,
            &history.educations,
            &application.posting(),
            input.custom_prompt.as_deref(),
            &input.settings,
        );
        run.advance(PipelineState::RequestComposed);

        let raw = self
            .generator
            .generate(&payload)
            .await
            .map_err(|e| run.fail(Stage::Generate, e))?;
        run.advance(PipelineState::Generated);

        let documents = split(&raw).map_err(|e| run.fail(Stage::Split, e))?;
        if documents.resume.is_empty() || documents.cover_letter.is_empty() {
            return Err(run.fail(
                Stage::Split,
                AppError::MalformedResponse(
                    "response contained an empty resume or cover letter section".to_string(),
                ),
            ));
        }
        run.advance(PipelineState::Split);

        self.attacher
            .attach(
                job_application_id,
                DocumentKind::Resume.as_str(),
                &documents.resume,
                user_id,
            )
            .await
            .map_err(|e| run.fail(Stage::AttachResume, e))?;
        run.advance(PipelineState::ResumeAttached);

        self.attacher
            .attach(
                job_application_id,
                DocumentKind::CoverLetter.as_str(),
                &documents.cover_letter,
                user_id,
            )
            .await
            .map_err(|e| run.fail(Stage::AttachCoverLetter, e))?;
        run.advance(PipelineState::CoverLetterAttached);

        info!(
            "Generated resume and cover letter for job application {job_application_id} (user {user_id})"
        );

        Ok(GenerationOutcome {
            job_application_id,
            resume: documents.resume,
            cover_letter: documents.cover_letter,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
