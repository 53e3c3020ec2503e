use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The job posting a generation run targets. Supplied per request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub description: String,
}

/// Scope of one generation attempt. Its id correlates every document the run produces.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Snapshot of the posting, 1:1 with a job application. Never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobDescriptionRow {
    pub id: Uuid,
    pub job_application_id: Uuid,
    pub title: String,
    pub company: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A job application together with the description written alongside it.
#[derive(Debug, Clone, Serialize)]
pub struct JobApplication {
    pub application: JobApplicationRow,
    pub description: JobDescriptionRow,
}

impl JobApplication {
    pub fn id(&self) -> Uuid {
        self.application.id
    }

    /// The posting as it was stored for this application.
    pub fn posting(&self) -> JobPosting {
        JobPosting {
            title: self.description.title.clone(),
            company: self.description.company.clone(),
            description: self.description.body.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub job_application_id: Uuid,
    pub kind: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Kinds of generated document that may be attached to a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Resume,
    #[serde(rename = "Cover Letter")]
    CoverLetter,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "Resume",
            DocumentKind::CoverLetter => "Cover Letter",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Resume" => Ok(DocumentKind::Resume),
            "Cover Letter" => Ok(DocumentKind::CoverLetter),
            other => Err(format!(
                "document kind must be 'Resume' or 'Cover Letter', got '{other}'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_parses_exact_names() {
        assert_eq!("Resume".parse::<DocumentKind>(), Ok(DocumentKind::Resume));
        assert_eq!(
            "Cover Letter".parse::<DocumentKind>(),
            Ok(DocumentKind::CoverLetter)
        );
    }

    #[test]
    fn test_document_kind_rejects_other_spellings() {
        assert!("resume".parse::<DocumentKind>().is_err());
        assert!("CoverLetter".parse::<DocumentKind>().is_err());
        assert!("".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn test_document_kind_serializes_with_display_name() {
        let json = serde_json::to_string(&DocumentKind::CoverLetter).unwrap();
        assert_eq!(json, r#""Cover Letter""#);
        assert_eq!(DocumentKind::Resume.to_string(), "Resume");
    }
}
