//! Solution request DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{
    sanitize_string, validate_problem_link, validate_section_content, validate_section_type,
    validate_title,
};

/// Public solution submission
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSolutionRequest {
    #[validate(custom(function = "validate_title"))]
    pub title: String,

    #[validate(length(min = 1, message = "Problem ID/Name is required."))]
    pub problem_id: String,

    #[serde(default)]
    #[validate(custom(function = "validate_problem_link"))]
    pub problem_statement_link: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "At least one section is required."), nested)]
    pub sections: Vec<SectionInput>,

    /// Comma-separated tag list
    #[serde(default)]
    pub tags: String,

    #[validate(length(min = 1, message = "Category is required."))]
    pub category: String,
}

impl SubmitSolutionRequest {
    /// Trim scalar fields so whitespace-only values fail validation
    pub fn normalized(mut self) -> Self {
        self.title = sanitize_string(&self.title);
        self.problem_id = sanitize_string(&self.problem_id);
        self.category = sanitize_string(&self.category);
        self.problem_statement_link = self
            .problem_statement_link
            .map(|link| link.trim().to_string())
            .filter(|link| !link.is_empty());
        self
    }
}

/// One section as sent by a client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SectionInput {
    /// Kept on admin edits; generated when absent
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "type")]
    #[validate(custom(function = "validate_section_type"))]
    pub section_type: String,

    #[validate(custom(function = "validate_section_content"))]
    pub content: String,

    #[serde(default)]
    pub language: Option<String>,
}

/// Listing query
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}
