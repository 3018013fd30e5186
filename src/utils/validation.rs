//! Input validation utilities

use std::borrow::Cow;

use validator::{ValidateUrl, ValidationError};

use crate::constants::{MAX_SECTION_CONTENT_LENGTH, MAX_TITLE_LENGTH, MIN_TITLE_LENGTH};
use crate::models::SectionType;

/// Split a comma-separated tag string into trimmed, non-empty, de-duplicated tags
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// A problem statement link may be empty or a well-formed URL
pub fn validate_problem_link(link: &str) -> Result<(), ValidationError> {
    if link.is_empty() || link.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url")
            .with_message(Cow::Borrowed("Problem statement link must be a valid URL.")))
    }
}

/// Section type must be one of the known kinds
pub fn validate_section_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<SectionType>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("section_type").with_message(Cow::Borrowed("Unknown section type.")))
}

/// Title must have at least `MIN_TITLE_LENGTH` characters once trimmed
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let length = title.trim().chars().count() as u64;
    if length < MIN_TITLE_LENGTH {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("Title must be at least 3 characters long.")));
    }
    if length > MAX_TITLE_LENGTH {
        return Err(ValidationError::new("length").with_message(Cow::Borrowed("Title is too long.")));
    }
    Ok(())
}

/// Section content must contain something other than whitespace
pub fn validate_section_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("Section content cannot be empty.")));
    }
    if content.chars().count() as u64 > MAX_SECTION_CONTENT_LENGTH {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("Section content is too long.")));
    }
    Ok(())
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}
