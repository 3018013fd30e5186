//! AI assistant boundary
//!
//! Summaries and tag/category suggestions come from an external model. The
//! rest of the application only sees the [`AiAssistant`] trait, so tests and
//! deployments without a model plug in a stub or [`DisabledAssistant`].

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use http::HttpAssistant;

/// Suggested tags and categories for a draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSuggestion {
    pub tags: Vec<String>,
    pub categories: Vec<String>,
}

impl TagSuggestion {
    /// Trim entries, drop empty ones and collapse case-insensitive duplicates
    pub fn cleaned(self) -> Self {
        Self {
            tags: dedupe(self.tags),
            categories: dedupe(self.categories),
        }
    }
}

fn dedupe(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values.into_iter().map(|v| v.trim().to_string()) {
        if !value.is_empty() && !out.iter().any(|o| o.eq_ignore_ascii_case(&value)) {
            out.push(value);
        }
    }
    out
}

/// Assistant failures
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("assistant is disabled")]
    Disabled,

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        AssistantError::Request(err.to_string())
    }
}

/// Text-in/text-out model capabilities
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiAssistant: Send + Sync {
    /// Summarize a section of a solution
    async fn summarize(&self, text: &str) -> Result<String, AssistantError>;

    /// Suggest tags and categories for a solution draft
    async fn suggest_tags_and_category(&self, text: &str) -> Result<TagSuggestion, AssistantError>;
}

/// Assistant used when no model endpoint is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAssistant;

#[async_trait]
impl AiAssistant for DisabledAssistant {
    async fn summarize(&self, _text: &str) -> Result<String, AssistantError> {
        Err(AssistantError::Disabled)
    }

    async fn suggest_tags_and_category(&self, _text: &str) -> Result<TagSuggestion, AssistantError> {
        Err(AssistantError::Disabled)
    }
}
