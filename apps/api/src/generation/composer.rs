//! Request Composer — merges profile, history, posting and settings into the
//! payload sent to the generation client. Pure: no I/O.

use serde::{Deserialize, Serialize};

use crate::generation::experience::{EducationSummary, EmploymentSummary};
use crate::models::job_application::JobPosting;
use crate::models::user::CandidateProfile;

pub const DEFAULT_RESUME_PAGE_LENGTH: u8 = 2;
const NO_PHONE: &str = "N/A";

/// Caller-supplied settings. Any key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub resume_page_length: Option<u8>,
    pub include_cover_letter: Option<bool>,
    pub include_personal_summary: Option<bool>,
    pub generate_skills: Option<bool>,
    pub highlight_skills_section: Option<bool>,
}

/// Settings with every key populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSettings {
    pub resume_page_length: u8,
    pub include_cover_letter: bool,
    pub include_personal_summary: bool,
    pub generate_skills: bool,
    pub highlight_skills_section: bool,
}

impl GenerationSettings {
    pub fn resolve(&self) -> ResolvedSettings {
        ResolvedSettings {
            resume_page_length: self
                .resume_page_length
                .unwrap_or(DEFAULT_RESUME_PAGE_LENGTH),
            include_cover_letter: self.include_cover_letter.unwrap_or(true),
            include_personal_summary: self.include_personal_summary.unwrap_or(true),
            generate_skills: self.generate_skills.unwrap_or(true),
            highlight_skills_section: self.highlight_skills_section.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateIdentity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Everything the model needs for one run. Serialized as the user turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequestPayload {
    pub candidate: CandidateIdentity,
    pub work_experience: Vec<EmploymentSummary>,
    pub education: Vec<EducationSummary>,
    pub job_posting: JobPosting,
    pub custom_prompt: String,
    pub settings: ResolvedSettings,
}

impl GenerationRequestPayload {
    pub fn to_prompt_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Entry order follows the inputs; nothing is re-sorted here.
pub fn compose(
    profile: &CandidateProfile,
    employments: &[EmploymentSummary],
    educations: &[EducationSummary],
    posting: &JobPosting,
    custom_prompt: Option<&str>,
    settings: &GenerationSettings,
) -> GenerationRequestPayload {
    GenerationRequestPayload {
        candidate: CandidateIdentity {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            phone: profile
                .phone
                .clone()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| NO_PHONE.to_string()),
        },
        work_experience: employments.to_vec(),
        education: educations.to_vec(),
        job_posting: posting.clone(),
        custom_prompt: custom_prompt.map(str::trim).unwrap_or_default().to_string(),
        settings: settings.resolve(),
    }
}
