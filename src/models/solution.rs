//! Solution model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CODE_LANGUAGE;

/// A submitted solution write-up, keyed by its slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub id: String,
    pub title: String,
    pub problem_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_statement_link: Option<String>,
    pub sections: Vec<SolutionSection>,
    pub tags: Vec<String>,
    pub category: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_approved: bool,
}

impl Solution {
    /// Moderation state derived from the approval flag
    pub fn approval_state(&self) -> ApprovalState {
        ApprovalState::from(self.is_approved)
    }

    /// Case-insensitive substring match over title, problem id, category and tags.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.problem_id.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// One ordered content block of a solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionSection {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SolutionSection {
    /// Build a section, keeping `language` only for code blocks
    pub fn new(
        id: impl Into<String>,
        section_type: SectionType,
        content: impl Into<String>,
        language: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            section_type,
            content: content.into(),
            language: normalize_language(section_type, language),
        }
    }

    /// Id given to the `index`-th (zero-based) section of a solution
    pub fn derived_id(solution_id: &str, index: usize) -> String {
        format!("{}-section-{}", solution_id, index + 1)
    }
}

/// Code sections always carry a language; every other kind never does
pub fn normalize_language(section_type: SectionType, language: Option<String>) -> Option<String> {
    match section_type {
        SectionType::Code => Some(
            language
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| DEFAULT_CODE_LANGUAGE.to_string()),
        ),
        _ => None,
    }
}

/// Section kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Heading,
    Paragraph,
    Code,
    Equation,
    Hint,
}

impl SectionType {
    pub const ALL: [SectionType; 5] = [
        SectionType::Heading,
        SectionType::Paragraph,
        SectionType::Code,
        SectionType::Equation,
        SectionType::Hint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Code => "code",
            Self::Equation => "equation",
            Self::Hint => "hint",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// Moderation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalState {
    Pending,
    Approved,
}

impl ApprovalState {
    /// The state reached by toggling
    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Approved,
            Self::Approved => Self::Pending,
        }
    }

    pub fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl From<bool> for ApprovalState {
    fn from(is_approved: bool) -> Self {
        if is_approved {
            Self::Approved
        } else {
            Self::Pending
        }
    }
}
