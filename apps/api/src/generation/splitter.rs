//! Response Splitter — cuts the model's single Markdown response into the
//! resume and cover letter at the `##CoverLetter##` marker.

use crate::errors::AppError;
use crate::llm_client::prompts::{COVER_LETTER_SENTINEL, RESUME_SENTINEL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDocuments {
    pub resume: String,
    pub cover_letter: String,
}

/// Resume content must precede the cover letter. Text without the cover letter
/// marker violates the output contract.
pub fn split(raw: &str) -> Result<SplitDocuments, AppError> {
    let marker = raw.find(COVER_LETTER_SENTINEL).ok_or_else(|| {
        AppError::MalformedResponse(format!(
            "response is missing the {COVER_LETTER_SENTINEL} marker"
        ))
    })?;

    let (resume_part, cover_part) = raw.split_at(marker);

    // Anything before the resume header (model preamble) is not part of the resume.
    let resume = resume_part
        .split_once(RESUME_SENTINEL)
        .map_or(resume_part, |(_, rest)| rest)
        .trim();

    let cover_letter = cover_part[COVER_LETTER_SENTINEL.len()..].trim();

    Ok(SplitDocuments {
        resume: resume.to_string(),
        cover_letter: cover_letter.to_string(),
    })
}
