//! OpenAI-compatible chat completion client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;

use super::{AiAssistant, AssistantError, TagSuggestion};

const SUMMARY_PROMPT: &str = "You summarize explanations of competitive programming solutions. \
Reply with a concise plain-text summary of at most three sentences.";

const SUGGESTION_PROMPT: &str = "You label competitive programming solution write-ups. \
Reply only with a JSON object of the form {\"tags\": [string], \"categories\": [string]}. \
Tags are short algorithm or technique names. Categories are broad problem areas.";

/// Assistant backed by a remote chat completion endpoint
#[derive(Debug, Clone)]
pub struct HttpAssistant {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSuggestion {
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    categories: Vec<String>,
}

impl HttpAssistant {
    /// Build a client for `config`. Returns `Ok(None)` when no endpoint is configured.
    pub fn from_config(config: &AiConfig) -> Result<Option<Self>, AssistantError> {
        let Some(api_url) = config.api_url.as_deref() else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Some(Self {
            client,
            endpoint: format!("{}/chat/completions", api_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, AssistantError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.2,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Request(format!("endpoint returned {}", status)));
        }

        let reply: ChatResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AssistantError::InvalidResponse("empty completion".to_string()))
    }
}

#[async_trait]
impl AiAssistant for HttpAssistant {
    async fn summarize(&self, text: &str) -> Result<String, AssistantError> {
        self.complete(SUMMARY_PROMPT, text).await
    }

    async fn suggest_tags_and_category(&self, text: &str) -> Result<TagSuggestion, AssistantError> {
        let reply = self.complete(SUGGESTION_PROMPT, text).await?;
        parse_suggestion(&reply)
    }
}

/// Parse a suggestion reply, tolerating a surrounding markdown code fence
fn parse_suggestion(reply: &str) -> Result<TagSuggestion, AssistantError> {
    let body = strip_code_fence(reply);
    let raw: RawSuggestion = serde_json::from_str(body)
        .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;

    Ok(TagSuggestion {
        tags: raw.tags,
        categories: raw.categories,
    }
    .cleaned())
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
