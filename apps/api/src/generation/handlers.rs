//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::generation::composer::GenerationSettings;
use crate::generation::pipeline::GenerationInput;
use crate::models::job_application::JobPosting;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Required fields are optional here so a missing one yields a 400 envelope
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub job_title: Option<String>,
    pub job_company: Option<String>,
    pub job_description_body: Option<String>,
    pub custom_prompt: Option<String>,
    #[serde(default)]
    pub settings: GenerationSettings,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub resume: String,
    pub cover_letter: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub success: bool,
    pub data: GeneratedContent,
    pub job_app_id: Uuid,
}

impl GenerateContentRequest {
    fn into_input(self) -> Result<GenerationInput, AppError> {
        let missing: Vec<&str> = [
            ("jobTitle", &self.job_title),
            ("jobCompany", &self.job_company),
            ("jobDescriptionBody", &self.job_description_body),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(GenerationInput {
            posting: JobPosting {
                title: self.job_title.unwrap_or_default(),
                company: self.job_company.unwrap_or_default(),
                description: self.job_description_body.unwrap_or_default(),
            },
            custom_prompt: self.custom_prompt,
            settings: self.settings,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/job-application/generate-content
///
/// Creates a job application for the posting, generates a tailored resume and
/// cover letter from the caller's profile and history, and attaches both.
pub async fn handle_generate_content(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    body: Result<Json<GenerateContentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GenerateContentResponse>), Response> {
    let Json(request) = body.map_err(|rejection| {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
            .into_response()
    })?;

    let input = request.into_input().map_err(IntoResponse::into_response)?;

    let outcome = state
        .pipeline
        .run(user_id, input)
        .await
        .map_err(IntoResponse::into_response)?;

    Ok((
        StatusCode::CREATED,
        Json(GenerateContentResponse {
            success: true,
            data: GeneratedContent {
                resume: outcome.resume,
                cover_letter: outcome.cover_letter,
            },
            job_app_id: outcome.job_application_id,
        }),
    ))
}
