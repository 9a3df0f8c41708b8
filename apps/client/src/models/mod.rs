pub mod chat;
pub mod cv;
pub mod job;
pub mod profile;
pub mod user;

pub use chat::{ChatMessage, ChatRole};
pub use cv::{Attachment, CvExtract, UploadedCv};
pub use job::{Job, JobPreferences};
pub use profile::{
    CertificationItem, ContactInfo, EducationItem, ExperienceItem, ProfileUpdate, ProjectItem,
    Skill, UserProfile,
};
pub use user::User;
