//! Admin login request DTOs

use serde::Deserialize;

/// Admin login form
///
/// Missing fields read as empty and are rejected with the same generic
/// credentials error as a wrong password.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}
