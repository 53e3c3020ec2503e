//! Experience Reader — loads a user's history and flattens it into the summaries
//! the request composer consumes. Every field is populated; gaps get placeholders.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::experience::{ExperienceDetails, ExperienceRecord};
use crate::storage::ExperienceStore;

pub const DATE_NOT_AVAILABLE: &str = "N/A";
pub const NO_JOB_TITLE: &str = "No job title specified";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_DEGREE: &str = "No degree specified";
pub const NO_FIELD_OF_STUDY: &str = "Unknown field of study";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentSummary {
    pub organization: String,
    pub job_title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationSummary {
    pub organization: String,
    pub degree: String,
    pub field_of_study: String,
    pub grade: f64,
    pub start_date: String,
    pub end_date: String,
}

/// A user's history split by kind, in storage order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperienceHistory {
    pub employments: Vec<EmploymentSummary>,
    pub educations: Vec<EducationSummary>,
}

impl ExperienceHistory {
    pub fn is_empty(&self) -> bool {
        self.employments.is_empty() && self.educations.is_empty()
    }
}

pub struct ExperienceReader {
    store: Arc<dyn ExperienceStore>,
}

impl ExperienceReader {
    pub fn new(store: Arc<dyn ExperienceStore>) -> Self {
        Self { store }
    }

    /// Fails with `NoExperience` when the user has nothing usable on file.
    pub async fn fetch(&self, user_id: Uuid) -> Result<ExperienceHistory, AppError> {
        let records = self.store.find_all_by_user(user_id).await?;
        let history = normalize(records);

        if history.is_empty() {
            return Err(AppError::NoExperience);
        }

        info!(
            "Loaded {} employments and {} educations for user {user_id}",
            history.employments.len(),
            history.educations.len()
        );
        Ok(history)
    }
}

/// Flattens raw records into summaries. Records whose end date precedes their
/// start date are skipped.
pub fn normalize(records: Vec<ExperienceRecord>) -> ExperienceHistory {
    let mut history = ExperienceHistory::default();

    for record in records {
        if !record.has_valid_range() {
            warn!(
                "Skipping experience {}: end date precedes start date",
                record.id
            );
            continue;
        }

        let start_date = format_date(record.start_date);
        let end_date = format_date(record.end_date);

        match record.details {
            ExperienceDetails::Employment {
                job_title,
                description,
            } => history.employments.push(EmploymentSummary {
                organization: record.organization,
                job_title: or_placeholder(job_title, NO_JOB_TITLE),
                description: or_placeholder(description, NO_DESCRIPTION),
                start_date,
                end_date,
            }),
            ExperienceDetails::Education {
                degree,
                field_of_study,
                grade,
            } => history.educations.push(EducationSummary {
                organization: record.organization,
                degree: or_placeholder(degree, NO_DEGREE),
                field_of_study: or_placeholder(field_of_study, NO_FIELD_OF_STUDY),
                grade: grade.unwrap_or(0.0),
                start_date,
                end_date,
            }),
        }
    }

    history
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| DATE_NOT_AVAILABLE.to_string())
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}
