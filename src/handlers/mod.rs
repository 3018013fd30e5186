//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod ai;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod solutions;

use axum::{Router, middleware};

use crate::{middleware::require_admin, state::AppState};

/// Create all API routes
pub fn routes(state: &AppState) -> Router<AppState> {
    let admin = auth::routes().merge(
        admin::routes().route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
    );

    Router::new()
        .merge(health::routes())
        .nest("/solutions", solutions::routes())
        .nest("/admin", admin)
        .nest("/ai", ai::routes())
}
