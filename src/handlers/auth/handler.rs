//! Admin login/logout handler implementations

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
};

use crate::{
    error::{AppError, AppResult},
    services::AuthService,
    state::AppState,
};

use super::{
    request::LoginRequest,
    response::{LoginResponse, LogoutResponse},
};

/// Check admin credentials and set the session cookie
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<(HeaderMap, Json<LoginResponse>)> {
    let config = state.config();
    let issued = AuthService::login(config, &payload.username, &payload.password)?;

    let cookie = AuthService::session_cookie(config)
        .header_value(&issued.token)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Session cookie is not a valid header")))?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    Ok((
        headers,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            token: issued.token,
            expires_in: issued.expires_in,
        }),
    ))
}

/// Delete the session cookie
pub async fn logout(State(state): State<AppState>) -> AppResult<(HeaderMap, Json<LogoutResponse>)> {
    let removal = AuthService::session_cookie(state.config())
        .removal_header_value()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Session cookie is not a valid header")))?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, removal);

    Ok((
        headers,
        Json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}
