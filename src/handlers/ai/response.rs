//! AI assistant response DTOs

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}
