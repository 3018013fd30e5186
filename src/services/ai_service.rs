//! AI assistant service

use tracing::warn;

use crate::{
    assistant::{AiAssistant, AssistantError, TagSuggestion},
    error::{AppError, AppResult},
};

const SUMMARY_FAILED: &str = "Failed to summarize text with AI.";
const SUGGESTION_FAILED: &str = "Failed to suggest tags and categories.";

/// Thin guard around the assistant: rejects empty input and normalizes failures
pub struct AiService;

impl AiService {
    pub async fn summarize(assistant: &dyn AiAssistant, text: &str) -> AppResult<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidInput("Cannot summarize empty text.".to_string()));
        }

        assistant
            .summarize(text)
            .await
            .map_err(|e| Self::map_error(e, SUMMARY_FAILED))
    }

    pub async fn suggest(assistant: &dyn AiAssistant, text: &str) -> AppResult<TagSuggestion> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidInput(
                "Cannot suggest tags for empty text.".to_string(),
            ));
        }

        assistant
            .suggest_tags_and_category(text)
            .await
            .map(TagSuggestion::cleaned)
            .map_err(|e| Self::map_error(e, SUGGESTION_FAILED))
    }

    fn map_error(err: AssistantError, message: &str) -> AppError {
        match err {
            AssistantError::Disabled => AppError::AiUnavailable,
            other => {
                warn!(error = %other, "AI assistant call failed");
                AppError::AiService(message.to_string())
            }
        }
    }
}
