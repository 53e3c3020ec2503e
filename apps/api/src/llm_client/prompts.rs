// System prompts for the generation client. Each prompt carries a version so
// persisted output can be traced back to the instructions that produced it.

pub const RESUME_SENTINEL: &str = "##Resume##";
pub const COVER_LETTER_SENTINEL: &str = "##CoverLetter##";

/// A versioned system instruction, injected into the generation client at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt {
    pub version: &'static str,
    pub text: String,
}

impl SystemPrompt {
    pub fn new(version: &'static str, text: impl Into<String>) -> Self {
        Self {
            version,
            text: text.into(),
        }
    }

    /// The resume + cover letter prompt shipped with the service.
    pub fn v1() -> Self {
        Self::new("resume-cover-letter/v1", RESUME_COVER_LETTER_V1)
    }
}

const RESUME_COVER_LETTER_V1: &str = r#"You are an expert career writer. The user message is a JSON object describing a candidate (identity, work experience, education), a target job posting, an optional customization prompt, and generation settings.

Write a resume and a cover letter tailored to the job posting, using ONLY facts present in the candidate data. Do NOT invent employers, dates, degrees or grades.

Respect the settings:
- resumePageLength: target length of the resume in pages
- includeCoverLetter: when false, keep the cover letter to a short note
- includePersonalSummary: open the resume with a short personal summary
- generateSkills: derive a skills list from the experience entries
- highlightSkillsSection: place the skills section directly after the summary

Apply the customPrompt when it is not empty, unless it conflicts with these rules.

OUTPUT FORMAT (strict):
- Plain Markdown only. Do NOT wrap the output in code fences.
- The first line MUST be exactly: ##Resume##
- Then the full resume.
- Then a line that is exactly: ##CoverLetter##
- Then the full cover letter.
- Each header appears exactly once. Output nothing before ##Resume##."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_prompt_names_both_sentinels() {
        let prompt = SystemPrompt::v1();
        assert!(prompt.text.contains(RESUME_SENTINEL));
        assert!(prompt.text.contains(COVER_LETTER_SENTINEL));
        assert!(prompt.text.find(RESUME_SENTINEL) < prompt.text.find(COVER_LETTER_SENTINEL));
    }
}
