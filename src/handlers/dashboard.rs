//! Admin dashboard pages
//!
//! `/admin` serves the moderation dashboard data behind the page gate, as does
//! every other `/admin/*` path; `/admin/login` describes how to obtain a session.

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    middleware,
    routing::get,
};
use serde::Serialize;

use crate::{
    constants::API_BASE_PATH,
    error::{AppError, AppResult},
    handlers::admin::DashboardResponse,
    middleware::{auth::session_from_headers, redirect_unauthenticated},
    services::SolutionService,
    state::AppState,
};

/// Login entry point descriptor
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPageResponse {
    pub authenticated: bool,
    pub login_endpoint: String,
    pub method: &'static str,
    pub fields: [&'static str; 2],
}

async fn dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardResponse>> {
    let dashboard = SolutionService::dashboard(state.store(), state.cache()).await?;
    Ok(Json(dashboard))
}

async fn unknown_page() -> AppError {
    AppError::NotFound("Page not found".to_string())
}

async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Json<LoginPageResponse> {
    let authenticated = session_from_headers(&headers, &state.config().jwt.secret).is_ok();

    Json(LoginPageResponse {
        authenticated,
        login_endpoint: format!("{}/admin/login", API_BASE_PATH),
        method: "POST",
        fields: ["username", "password"],
    })
}

/// Dashboard page routes
pub fn routes(state: &AppState) -> Router<AppState> {
    let gated = Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/{*rest}", get(unknown_page))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            redirect_unauthenticated,
        ));

    Router::new()
        .route("/admin/login", get(login_page))
        .merge(gated)
}
