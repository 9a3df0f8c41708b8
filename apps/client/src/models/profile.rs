//! User profile model: the structured CV data the rest of the app consumes.
//!
//! Field names serialize in camelCase: the snapshot format and the backend
//! payloads both use it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    #[serde(default)]
    pub id: String,
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A skill is stored either as a bare name or as a structured record, and
/// both forms coexist in one array. Consumers go through [`Skill::name`]
/// so the two forms are indistinguishable downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Skill {
    Name(String),
    Detailed {
        #[serde(default)]
        id: String,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<String>,
    },
}

impl Skill {
    /// The uniform accessor: the only way the rest of the crate reads a skill.
    pub fn name(&self) -> &str {
        match self {
            Skill::Name(name) => name,
            Skill::Detailed { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
    #[serde(default)]
    pub certifications: Vec<CertificationItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_uploaded_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_job_titles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_job_title: Option<String>,
}

impl UserProfile {
    /// Skill names regardless of storage form.
    pub fn skill_names(&self) -> Vec<&str> {
        self.skills.iter().map(Skill::name).collect()
    }
}

/// Shallow profile update: only present fields overwrite, and nested arrays
/// are replaced whole, never merged element-wise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<ExperienceItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<EducationItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<Skill>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<CertificationItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_uploaded_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_job_titles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_job_title: Option<String>,
}

impl ProfileUpdate {
    /// Applies the update onto an existing profile, top-level keys only.
    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(v) = self.contact_info {
            profile.contact_info = v;
        }
        if let Some(v) = self.experience {
            profile.experience = v;
        }
        if let Some(v) = self.education {
            profile.education = v;
        }
        if let Some(v) = self.skills {
            profile.skills = v;
        }
        if let Some(v) = self.projects {
            profile.projects = v;
        }
        if let Some(v) = self.certifications {
            profile.certifications = v;
        }
        if let Some(v) = self.resume_file_name {
            profile.resume_file_name = Some(v);
        }
        if let Some(v) = self.resume_uploaded_at {
            profile.resume_uploaded_at = Some(v);
        }
        if let Some(v) = self.resume_text {
            profile.resume_text = Some(v);
        }
        if let Some(v) = self.resume_base64 {
            profile.resume_base64 = Some(v);
        }
        if let Some(v) = self.suggested_job_titles {
            profile.suggested_job_titles = Some(v);
        }
        if let Some(v) = self.primary_job_title {
            profile.primary_job_title = Some(v);
        }
    }
}
