//! Downloadable artifact builders for the two export formats.

pub mod docx;
pub mod layout;
pub mod pdf;

use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::document::section::DocumentKind;
use crate::models::Attachment;

pub use docx::to_word_document;
pub use pdf::to_paginated_document;

/// A produced document ready for download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl ExportArtifact {
    /// Download handle for the shell's attachment list.
    pub fn into_attachment(self) -> Attachment {
        Attachment {
            id: Uuid::new_v4(),
            size_bytes: self.bytes.len() as u64,
            name: self.file_name,
            mime_type: self.mime_type,
            url: None,
        }
    }
}

/// Kind- and timestamp-qualified artifact name, e.g. `cv-1700000000000.pdf`.
pub(crate) fn artifact_file_name(kind: DocumentKind, extension: &str) -> String {
    format!(
        "{}-{}.{}",
        kind.as_str(),
        Utc::now().timestamp_millis(),
        extension
    )
}
