//! Admin gate middleware
//!
//! API routes answer `401` without a valid session; dashboard pages redirect
//! to the login page instead.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::{
    constants::{ADMIN_AUTH_COOKIE_NAME, ADMIN_LOGIN_PATH},
    error::{AppError, AppResult},
    services::AuthService,
    state::AppState,
    utils::{extract_bearer, extract_cookie},
};

/// Verified admin session, available to gated handlers
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub username: String,
    /// Expiry as a unix timestamp
    pub expires_at: i64,
}

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminSession>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Resolve the admin session from the cookie or an `Authorization: Bearer` header
pub fn session_from_headers(headers: &HeaderMap, secret: &str) -> AppResult<AdminSession> {
    let token = extract_cookie(headers, ADMIN_AUTH_COOKIE_NAME)
        .or_else(|| extract_bearer(headers))
        .ok_or(AppError::Unauthorized)?;

    let claims = AuthService::verify_token(&token, secret)?;
    Ok(AdminSession {
        username: claims.username,
        expires_at: claims.exp,
    })
}

/// Gate for `/api/admin/*`
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let session = session_from_headers(request.headers(), &state.config().jwt.secret)
        .inspect_err(|e| debug!(path = %request.uri().path(), error = %e, "Admin API request rejected"))?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Gate for dashboard pages under `/admin`
pub async fn redirect_unauthenticated(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match session_from_headers(request.headers(), &state.config().jwt.secret) {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(e) => {
            debug!(path = %request.uri().path(), error = %e, "Redirecting to admin login");
            Redirect::to(ADMIN_LOGIN_PATH).into_response()
        }
    }
}
