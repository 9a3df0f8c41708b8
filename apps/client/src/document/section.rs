//! Document section model.
//!
//! A parsed CV or cover letter is an ordered sequence of typed sections.
//! The sequence order is authoritative for rendering and export; the shell
//! reorders by replacing the whole list and edits by replacing one
//! section's content.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which document a raw AI text blob represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Cv,
    CoverLetter,
}

impl DocumentKind {
    /// Kind qualifier used in exported file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Cv => "cv",
            DocumentKind::CoverLetter => "cover-letter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Header,
    Summary,
    Experience,
    Projects,
    Education,
    Skills,
    Generic,
}

/// One structural block of a rendered document: an uppercase heading
/// (empty for the header block) plus a rich-text content fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub title: String,
    pub content: String,
}

impl Section {
    pub fn new(kind: SectionKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Section {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Commits an inline edit: the editor owns transient state and hands
    /// back a full replacement blob on confirm.
    pub fn replace_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

/// Heading keywords that open a new section. Matched case-insensitively
/// against the whole trimmed line.
pub const HEADING_VOCABULARY: &[&str] = &[
    "SUMMARY",
    "PROFESSIONAL EXPERIENCE",
    "EXPERIENCE",
    "PROJECTS",
    "EDUCATION",
    "SKILLS",
    "CERTIFICATIONS",
    "LANGUAGES",
    "AWARDS",
    "REFERENCES",
    "PUBLICATIONS",
    "VOLUNTEER",
    "ACHIEVEMENTS",
];

/// True when the trimmed line is exactly one of the heading keywords.
pub fn is_heading(line: &str) -> bool {
    let upper = line.trim().to_uppercase();
    HEADING_VOCABULARY.contains(&upper.as_str())
}

/// Maps a heading to its section kind by keyword containment.
pub fn heading_kind(heading: &str) -> SectionKind {
    let upper = heading.to_uppercase();
    if upper.contains("SUMMARY") {
        SectionKind::Summary
    } else if upper.contains("EXPERIENCE") {
        SectionKind::Experience
    } else if upper.contains("PROJECT") {
        SectionKind::Projects
    } else if upper.contains("EDUCATION") {
        SectionKind::Education
    } else if upper.contains("SKILL") {
        SectionKind::Skills
    } else {
        SectionKind::Generic
    }
}
