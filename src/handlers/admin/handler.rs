//! Admin handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::solutions::SolutionListResponse,
    middleware::AdminSession,
    models::Solution,
    services::SolutionService,
    state::AppState,
};

use super::{
    request::{ReplaceSectionsRequest, UpdateSectionRequest},
    response::{ApprovalResponse, SectionsUpdatedResponse},
};

/// Every solution, pending ones included
pub async fn list_all_solutions(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<Json<SolutionListResponse>> {
    let solutions = SolutionService::list_all(state.store(), state.cache()).await?;
    Ok(Json(solutions.into()))
}

/// Full record regardless of approval
pub async fn get_solution(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<Solution>> {
    let solution = SolutionService::get_by_id(state.store(), &id).await?;
    Ok(Json(solution))
}

/// Flip approval
pub async fn toggle_approval(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApprovalResponse>> {
    tracing::debug!(admin = %session.username, solution_id = %id, "Toggling approval");
    let response = SolutionService::toggle_approval(state.store(), state.cache(), &id).await?;
    Ok(Json(response))
}

/// Replace every section
pub async fn replace_sections(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<ReplaceSectionsRequest>,
) -> AppResult<Json<SectionsUpdatedResponse>> {
    payload.validate()?;

    let solution =
        SolutionService::replace_sections(state.store(), state.cache(), &id, &payload.sections)
            .await?;

    Ok(Json(SectionsUpdatedResponse {
        message: "Sections updated successfully.".to_string(),
        solution,
    }))
}

/// Edit the content of one section
pub async fn update_section(
    State(state): State<AppState>,
    _session: AdminSession,
    Path((id, section_id)): Path<(String, String)>,
    Json(payload): Json<UpdateSectionRequest>,
) -> AppResult<Json<SectionsUpdatedResponse>> {
    payload.validate()?;

    let solution = SolutionService::update_section_content(
        state.store(),
        state.cache(),
        &id,
        &section_id,
        &payload.content,
    )
    .await?;

    Ok(Json(SectionsUpdatedResponse {
        message: "Section updated successfully.".to_string(),
        solution,
    }))
}
