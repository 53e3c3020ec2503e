use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Flat join of `experiences` with its `employments` / `educations` sub-record.
/// Only the columns belonging to `kind` are populated.
#[derive(Debug, Clone, FromRow)]
pub struct ExperienceRow {
    pub id: Uuid,
    pub kind: String,
    pub organization: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub job_title: Option<String>,
    pub description: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub grade: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExperienceDetails {
    Employment {
        job_title: Option<String>,
        description: Option<String>,
    },
    Education {
        degree: Option<String>,
        field_of_study: Option<String>,
        grade: Option<f64>,
    },
}

/// A single entry of a user's work/education history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceRecord {
    pub id: Uuid,
    pub organization: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub details: ExperienceDetails,
}

impl ExperienceRecord {
    /// An end date, when present, must not precede the start date.
    pub fn has_valid_range(&self) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => end >= start,
            _ => true,
        }
    }
}

impl TryFrom<ExperienceRow> for ExperienceRecord {
    type Error = String;

    fn try_from(row: ExperienceRow) -> Result<Self, Self::Error> {
        let details = match row.kind.as_str() {
            "employment" => ExperienceDetails::Employment {
                job_title: row.job_title,
                description: row.description,
            },
            "education" => ExperienceDetails::Education {
                degree: row.degree,
                field_of_study: row.field_of_study,
                grade: row.grade,
            },
            other => return Err(format!("experience {} has unknown kind '{other}'", row.id)),
        };

        Ok(ExperienceRecord {
            id: row.id,
            organization: row.organization,
            start_date: row.start_date,
            end_date: row.end_date,
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: &str) -> ExperienceRow {
        ExperienceRow {
            id: Uuid::new_v4(),
            kind: kind.to_string(),
            organization: "Acme".to_string(),
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            end_date: None,
            job_title: Some("Engineer".to_string()),
            description: None,
            degree: Some("BSc".to_string()),
            field_of_study: None,
            grade: Some(3.7),
        }
    }

    #[test]
    fn test_employment_row_keeps_only_employment_fields() {
        let record = ExperienceRecord::try_from(row("employment")).unwrap();
        assert_eq!(
            record.details,
            ExperienceDetails::Employment {
                job_title: Some("Engineer".to_string()),
                description: None,
            }
        );
    }

    #[test]
    fn test_education_row_keeps_only_education_fields() {
        let record = ExperienceRecord::try_from(row("education")).unwrap();
        assert!(matches!(
            record.details,
            ExperienceDetails::Education { grade: Some(g), .. } if (g - 3.7).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = ExperienceRecord::try_from(row("hobby")).unwrap_err();
        assert!(err.contains("hobby"));
    }

    #[test]
    fn test_inverted_date_range_is_invalid() {
        let mut record = ExperienceRecord::try_from(row("employment")).unwrap();
        record.end_date = NaiveDate::from_ymd_opt(2019, 12, 31);
        assert!(!record.has_valid_range());

        record.end_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert!(record.has_valid_range());

        record.start_date = None;
        assert!(record.has_valid_range());
    }
}
