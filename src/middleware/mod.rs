//! HTTP middleware

pub mod auth;
pub mod logging;

pub use auth::{AdminSession, redirect_unauthenticated, require_admin};
pub use logging::logging_middleware;
