//! AI assistant request DTOs

use serde::Deserialize;

/// Text to summarize or label
#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    #[serde(default)]
    pub text: String,
}
