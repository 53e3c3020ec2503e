//! Generation Client — turns a composed payload into the model's raw Markdown.

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::generation::composer::GenerationRequestPayload;
use crate::llm_client::prompts::SystemPrompt;
use crate::llm_client::{strip_markdown_fences, LlmClient};

/// Seam between the pipeline and the generative-text provider.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the raw response text with any code-fence wrapper removed.
    async fn generate(&self, payload: &GenerationRequestPayload) -> Result<String, AppError>;
}

/// Provider-backed generator. Makes exactly one call per request.
pub struct LlmGenerator {
    llm: LlmClient,
    system_prompt: SystemPrompt,
}

impl LlmGenerator {
    pub fn new(llm: LlmClient, system_prompt: SystemPrompt) -> Self {
        Self { llm, system_prompt }
    }
}

#[async_trait]
impl TextGenerator for LlmGenerator {
    async fn generate(&self, payload: &GenerationRequestPayload) -> Result<String, AppError> {
        let user_turn = payload
            .to_prompt_text()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize payload: {e}")))?;

        info!(
            "Requesting generation (model: {}, prompt: {})",
            self.llm.model(),
            self.system_prompt.version
        );

        let raw = self
            .llm
            .chat(&self.system_prompt.text, &user_turn)
            .await
            .map_err(|e| AppError::GenerationService(e.to_string()))?;

        Ok(strip_markdown_fences(&raw).to_string())
    }
}
