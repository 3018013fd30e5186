//! Admin moderation handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Admin routes (gated by the caller)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/solutions", get(handler::list_all_solutions))
        .route("/solutions/{id}", get(handler::get_solution))
        .route("/solutions/{id}/approval", post(handler::toggle_approval))
        .route("/solutions/{id}/sections", put(handler::replace_sections))
        .route(
            "/solutions/{id}/sections/{section_id}",
            put(handler::update_section),
        )
}
