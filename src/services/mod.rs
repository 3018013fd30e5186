//! Business logic services

pub mod ai_service;
pub mod auth_service;
pub mod solution_service;

pub use ai_service::AiService;
pub use auth_service::{AuthService, Claims};
pub use solution_service::SolutionService;
