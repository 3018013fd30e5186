//! Public solution handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

/// Public solution routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_solutions).post(handler::submit_solution))
        .route("/{id}", get(handler::get_solution))
}

/// Public detail page, the target of the submission `Location` header
pub fn page_routes() -> Router<AppState> {
    Router::new().route("/problems/{id}", get(handler::get_solution))
}
