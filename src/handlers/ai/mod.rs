//! AI assistant handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{Router, routing::post};

use crate::state::AppState;

/// Assistant routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summarize", post(handler::summarize))
        .route("/suggestions", post(handler::suggest))
}
