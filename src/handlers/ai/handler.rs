//! AI assistant handler implementations

use axum::{Json, extract::State};

use crate::{assistant::TagSuggestion, error::AppResult, services::AiService, state::AppState};

use super::{request::AssistantRequest, response::SummaryResponse};

/// Summarize a block of text
pub async fn summarize(
    State(state): State<AppState>,
    Json(payload): Json<AssistantRequest>,
) -> AppResult<Json<SummaryResponse>> {
    let summary = AiService::summarize(state.assistant(), &payload.text).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// Suggest tags and categories for a draft
pub async fn suggest(
    State(state): State<AppState>,
    Json(payload): Json<AssistantRequest>,
) -> AppResult<Json<TagSuggestion>> {
    let suggestion = AiService::suggest(state.assistant(), &payload.text).await?;
    Ok(Json(suggestion))
}
