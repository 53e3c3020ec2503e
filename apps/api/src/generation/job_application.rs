//! Job Application Writer — validates the posting, then writes the application
//! and its description as one unit.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job_application::{JobApplication, JobPosting};
use crate::storage::JobApplicationStore;

const TITLE_CHARS: std::ops::RangeInclusive<usize> = 2..=100;
const COMPANY_CHARS: std::ops::RangeInclusive<usize> = 1..=100;

pub struct JobApplicationWriter {
    store: Arc<dyn JobApplicationStore>,
}

impl JobApplicationWriter {
    pub fn new(store: Arc<dyn JobApplicationStore>) -> Self {
        Self { store }
    }

    /// Nothing is written when validation fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        posting: &JobPosting,
    ) -> Result<JobApplication, AppError> {
        let posting = validate_posting(posting)?;
        let created = self.store.create_with_description(user_id, &posting).await?;

        info!(
            "Created job application {} for user {user_id} ({} at {})",
            created.id(),
            posting.title,
            posting.company
        );
        Ok(created)
    }
}

/// Returns the trimmed posting, or the first rule it breaks.
pub fn validate_posting(posting: &JobPosting) -> Result<JobPosting, AppError> {
    let title = posting.title.trim();
    let company = posting.company.trim();
    let description = posting.description.trim();

    check_length("job title", title, &TITLE_CHARS)?;
    check_length("job company", company, &COMPANY_CHARS)?;
    if description.is_empty() {
        return Err(AppError::Validation("job description is required".to_string()));
    }

    Ok(JobPosting {
        title: title.to_string(),
        company: company.to_string(),
        description: description.to_string(),
    })
}

fn check_length(
    field: &str,
    value: &str,
    bounds: &std::ops::RangeInclusive<usize>,
) -> Result<(), AppError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    if !bounds.contains(&len) {
        return Err(AppError::Validation(format!(
            "{field} must be between {} and {} characters",
            bounds.start(),
            bounds.end()
        )));
    }
    Ok(())
}
