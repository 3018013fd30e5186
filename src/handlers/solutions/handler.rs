//! Public solution handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::{error::AppResult, services::SolutionService, state::AppState};

use super::{
    request::{SearchQuery, SubmitSolutionRequest},
    response::{SolutionListResponse, SolutionView, SubmitSolutionResponse},
};

/// List approved solutions, optionally filtered by `?search=`
pub async fn list_solutions(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<SolutionListResponse>> {
    let solutions =
        SolutionService::search(state.store(), state.cache(), query.search.as_deref()).await?;

    Ok(Json(solutions.into()))
}

/// Submit a new solution for review
pub async fn submit_solution(
    State(state): State<AppState>,
    Json(payload): Json<SubmitSolutionRequest>,
) -> AppResult<Response> {
    let payload = payload.normalized();
    payload.validate()?;

    let solution = SolutionService::create(state.store(), state.cache(), payload).await?;
    let url = format!("/problems/{}", solution.id);

    let body = SubmitSolutionResponse {
        message: "Solution submitted successfully. It will be visible once approved.".to_string(),
        id: solution.id.clone(),
        url: url.clone(),
        solution,
    };

    Ok((StatusCode::CREATED, [(header::LOCATION, url)], Json(body)).into_response())
}

/// Public detail view
pub async fn get_solution(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SolutionView>> {
    let view = SolutionService::get_view(state.store(), state.cache(), &id).await?;
    Ok(Json(view))
}
