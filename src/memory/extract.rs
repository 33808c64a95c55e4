//! Memory extraction: transcript → prompt → one model call → parsed profile.

use std::sync::Arc;

use super::parse::{parse_memory_response, ParsedMemory};
use super::prompt::extraction_prompt;
use super::types::{ChatMessage, UserMemory};
use crate::model::{ModelClient, ModelError};

/// Extracts a [`UserMemory`] profile from chat messages.
#[derive(Clone)]
pub struct MemoryExtractor {
    model: Arc<dyn ModelClient>,
}

impl MemoryExtractor {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }

    /// Extract a profile from `messages`.
    ///
    /// Unusable model output degrades to [`UserMemory::unavailable`]; only a
    /// transport failure (model unreachable, unauthorized, quota) is an error.
    pub async fn extract(&self, messages: &[ChatMessage]) -> Result<UserMemory, ModelError> {
        Ok(self.extract_detailed(messages).await?.into_memory())
    }

    /// Like [`extract`](Self::extract) but reports whether the result was degraded.
    pub async fn extract_detailed(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ParsedMemory, ModelError> {
        let prompt = extraction_prompt(messages);

        tracing::info!(
            message_count = messages.len(),
            model = %self.model.model_name(),
            "extracting memory"
        );

        let raw = match self.model.generate(&prompt).await {
            Ok(text) => text,
            Err(ModelError::EmptyResponse) => {
                tracing::warn!(operation = "extract_memory", "model returned no text");
                String::new()
            }
            Err(e) => {
                tracing::error!(operation = "extract_memory", error = %e, "model call failed");
                return Err(e);
            }
        };

        let parsed = parse_memory_response(&raw);
        if !parsed.is_degraded() {
            tracing::info!(
                likes = parsed.memory().preferences.likes.len(),
                goals = parsed.memory().facts.goals.len(),
                "memory extracted"
            );
        }
        Ok(parsed)
    }
}
