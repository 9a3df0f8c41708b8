//! CV upload and extraction types.
//!
//! `UploadedCv` is the transient in-memory file handle; it never reaches
//! the persisted snapshot. `CvExtract` is the structured result returned by
//! the extraction service and is persisted like any other store field.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::{
    CertificationItem, ContactInfo, EducationItem, ExperienceItem, ProjectItem,
};

/// An uploaded CV file held in memory for the duration of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedCv {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl UploadedCv {
    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Structured CV-extraction result, mirroring the extraction service payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvExtract {
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub experiences: Vec<ExperienceItem>,
    #[serde(default)]
    pub educations: Vec<EducationItem>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
    #[serde(default)]
    pub certifications: Vec<CertificationItem>,
    #[serde(default)]
    pub raw_text: String,
}

/// Download handle for a produced artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
