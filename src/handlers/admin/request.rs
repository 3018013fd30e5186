//! Admin request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{handlers::solutions::SectionInput, utils::validation::validate_section_content};

/// Replacement of a solution's sections
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplaceSectionsRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "At least one section is required."), nested)]
    pub sections: Vec<SectionInput>,
}

/// Inline edit of a single section
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSectionRequest {
    #[validate(custom(function = "validate_section_content"))]
    pub content: String,
}
