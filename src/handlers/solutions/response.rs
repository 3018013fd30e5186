//! Solution response DTOs

use serde::{Deserialize, Serialize};

use crate::{constants::PENDING_APPROVAL_MESSAGE, models::Solution};

/// Listing of solutions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionListResponse {
    pub solutions: Vec<Solution>,
    pub total: usize,
}

impl From<Vec<Solution>> for SolutionListResponse {
    fn from(solutions: Vec<Solution>) -> Self {
        Self {
            total: solutions.len(),
            solutions,
        }
    }
}

/// Accepted submission
#[derive(Debug, Serialize)]
pub struct SubmitSolutionResponse {
    pub message: String,
    pub id: String,
    /// Public page of the new solution
    pub url: String,
    pub solution: Solution,
}

/// Public detail view; pending solutions only reveal a placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SolutionView {
    Published {
        solution: Solution,
    },
    Pending {
        id: String,
        title: String,
        #[serde(rename = "isApproved")]
        is_approved: bool,
        message: String,
    },
}

impl From<Solution> for SolutionView {
    fn from(solution: Solution) -> Self {
        if solution.is_approved {
            SolutionView::Published { solution }
        } else {
            SolutionView::Pending {
                id: solution.id,
                title: solution.title,
                is_approved: false,
                message: PENDING_APPROVAL_MESSAGE.to_string(),
            }
        }
    }
}
