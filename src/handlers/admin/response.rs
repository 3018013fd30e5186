//! Admin response DTOs

use serde::{Deserialize, Serialize};

use crate::models::Solution;

/// Result of an approval toggle
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalResponse {
    pub success: bool,
    pub message: String,
    pub is_approved: bool,
    pub solution: Solution,
}

/// Result of a section edit
#[derive(Debug, Serialize)]
pub struct SectionsUpdatedResponse {
    pub message: String,
    pub solution: Solution,
}

/// Moderation dashboard data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub solutions: Vec<Solution>,
}

impl From<Vec<Solution>> for DashboardResponse {
    fn from(solutions: Vec<Solution>) -> Self {
        let approved = solutions.iter().filter(|s| s.is_approved).count();
        Self {
            total: solutions.len(),
            approved,
            pending: solutions.len() - approved,
            solutions,
        }
    }
}
