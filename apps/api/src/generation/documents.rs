//! Document Attacher — persists one generated document against a job application
//! owned by the caller.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job_application::{DocumentKind, DocumentRow};
use crate::storage::{DocumentStore, JobApplicationStore};

pub struct DocumentAttacher {
    applications: Arc<dyn JobApplicationStore>,
    documents: Arc<dyn DocumentStore>,
}

impl DocumentAttacher {
    pub fn new(
        applications: Arc<dyn JobApplicationStore>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            applications,
            documents,
        }
    }

    /// Creates exactly one document row. `kind` must be "Resume" or "Cover Letter".
    pub async fn attach(
        &self,
        job_application_id: Uuid,
        kind: &str,
        body: &str,
        user_id: Uuid,
    ) -> Result<DocumentRow, AppError> {
        let kind: DocumentKind = kind.parse().map_err(AppError::Validation)?;
        if body.trim().is_empty() {
            return Err(AppError::Validation(format!("{kind} body cannot be empty")));
        }

        // Someone else's application is reported exactly like a missing one
        self.applications
            .find_by_id_for_owner(job_application_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFoundOrForbidden(format!(
                    "Job application {job_application_id} not found"
                ))
            })?;

        let document = self
            .documents
            .create(job_application_id, kind, body)
            .await?;

        info!(
            "Attached {kind} {} to job application {job_application_id}",
            document.id
        );
        Ok(document)
    }
}
