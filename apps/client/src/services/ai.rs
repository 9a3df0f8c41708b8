//! AI service client: CV extraction, generation, and assistant chat.
//!
//! The generation endpoints sit behind the [`GenerationService`] trait so
//! the shell (and tests) can substitute a scripted implementation. All
//! result payloads use the service's native snake_case field names.
//!
//! Every generation call that needs a job description validates it before
//! any network I/O: a missing input is a user-facing notice, not a failed
//! request, and must leave the store untouched.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::AppError;
use crate::models::{ChatMessage, CvExtract, UserProfile};
use crate::services::{require_non_empty, ApiClient};

/// Match analysis for one profile/job pairing. `match_score` is a 0..1
/// fraction; `ats_score` is the 0–100 screening estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchScoreResult {
    pub match_score: f64,
    pub ats_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub keywords_to_add: Vec<String>,
    #[serde(default)]
    pub recommended_bullets: Vec<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangesMade {
    pub words_added: u32,
    pub words_removed: u32,
    pub length_change_percent: f64,
    #[serde(default)]
    pub top_keywords_added: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredResume {
    pub tailored_resume: String,
    #[serde(default)]
    pub changes_made: Option<ChangesMade>,
    #[serde(default)]
    pub optimization_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverLetter {
    pub cover_letter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedEmail {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTitleSuggestions {
    #[serde(default)]
    pub job_titles: Vec<String>,
    #[serde(default)]
    pub primary_title: Option<String>,
}

/// Style knobs for resume tailoring.
#[derive(Debug, Clone)]
pub struct TailorOptions {
    pub style: String,
    pub tone: String,
    pub length: String,
}

impl Default for TailorOptions {
    fn default() -> Self {
        TailorOptions {
            style: "professional".into(),
            tone: "professional".into(),
            length: "standard".into(),
        }
    }
}

const DEFAULT_RECIPIENT: &str = "recruiter";

/// The AI generation boundary. One method per endpoint; implementations
/// must not mutate any state. Callers feed results into the store.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn match_score(
        &self,
        profile: &UserProfile,
        job_description: &str,
        resume_text: Option<&str>,
    ) -> Result<MatchScoreResult, AppError>;

    async fn tailor_resume(
        &self,
        original_cv: &str,
        job_description: &str,
        profile: &UserProfile,
        options: &TailorOptions,
    ) -> Result<TailoredResume, AppError>;

    async fn generate_cover_letter(
        &self,
        job_description: &str,
        profile: &UserProfile,
        company_name: Option<&str>,
    ) -> Result<CoverLetter, AppError>;

    async fn generate_email(
        &self,
        job_description: &str,
        profile: &UserProfile,
        recipient_type: Option<&str>,
    ) -> Result<GeneratedEmail, AppError>;

    async fn assistant_chat(
        &self,
        message: &str,
        context: Option<&serde_json::Value>,
        history: &[ChatMessage],
    ) -> Result<ChatReply, AppError>;

    async fn extract_job_titles(
        &self,
        cv_text: &str,
        preferred_role: Option<&str>,
    ) -> Result<JobTitleSuggestions, AppError>;
}

#[async_trait]
impl GenerationService for ApiClient {
    async fn match_score(
        &self,
        profile: &UserProfile,
        job_description: &str,
        resume_text: Option<&str>,
    ) -> Result<MatchScoreResult, AppError> {
        require_non_empty(job_description, "Job description")?;
        self.post_json(
            &self.ai_url("/agents/match-score"),
            &json!({
                "userProfile": profile,
                "jobDescription": job_description,
                "resumeText": resume_text,
            }),
        )
        .await
    }

    async fn tailor_resume(
        &self,
        original_cv: &str,
        job_description: &str,
        profile: &UserProfile,
        options: &TailorOptions,
    ) -> Result<TailoredResume, AppError> {
        require_non_empty(original_cv, "Resume text")?;
        require_non_empty(job_description, "Job description")?;
        self.post_json(
            &self.ai_url("/agents/tailor-resume"),
            &json!({
                "originalCV": original_cv,
                "jobDescription": job_description,
                "userProfile": profile,
                "style": options.style,
                "tone": options.tone,
                "length": options.length,
            }),
        )
        .await
    }

    async fn generate_cover_letter(
        &self,
        job_description: &str,
        profile: &UserProfile,
        company_name: Option<&str>,
    ) -> Result<CoverLetter, AppError> {
        require_non_empty(job_description, "Job description")?;
        self.post_json(
            &self.ai_url("/agents/generate-cover-letter"),
            &json!({
                "jobDescription": job_description,
                "userProfile": profile,
                "companyName": company_name,
            }),
        )
        .await
    }

    async fn generate_email(
        &self,
        job_description: &str,
        profile: &UserProfile,
        recipient_type: Option<&str>,
    ) -> Result<GeneratedEmail, AppError> {
        require_non_empty(job_description, "Job description")?;
        self.post_json(
            &self.ai_url("/agents/generate-email"),
            &json!({
                "jobDescription": job_description,
                "userProfile": profile,
                "recipientType": recipient_type.unwrap_or(DEFAULT_RECIPIENT),
            }),
        )
        .await
    }

    async fn assistant_chat(
        &self,
        message: &str,
        context: Option<&serde_json::Value>,
        history: &[ChatMessage],
    ) -> Result<ChatReply, AppError> {
        require_non_empty(message, "Message")?;
        self.post_json(
            &self.ai_url("/agents/neilwe-chat"),
            &json!({
                "message": message,
                "context": context,
                "chatHistory": history,
            }),
        )
        .await
    }

    async fn extract_job_titles(
        &self,
        cv_text: &str,
        preferred_role: Option<&str>,
    ) -> Result<JobTitleSuggestions, AppError> {
        require_non_empty(cv_text, "CV text")?;
        self.post_json(
            &self.ai_url("/agents/extract-job-titles"),
            &json!({
                "cv_text": cv_text,
                "preferred_role": preferred_role.unwrap_or(""),
            }),
        )
        .await
    }
}

impl ApiClient {
    /// Uploads a CV file and returns the structured extraction.
    pub async fn extract_cv(
        &self,
        file_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> Result<CvExtract, AppError> {
        let part = reqwest::multipart::Part::bytes(data.to_vec())
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| AppError::Validation(format!("invalid mime type: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);
        self.post_multipart(&self.ai_url("/agents/extract-cv"), form)
            .await
    }

    /// The paste-text path: structured extraction from raw text instead of
    /// a file upload.
    pub async fn autofill_cv(&self, text_content: &str) -> Result<CvExtract, AppError> {
        require_non_empty(text_content, "CV text")?;
        let form =
            reqwest::multipart::Form::new().text("text_content", text_content.to_string());
        self.post_multipart(&self.ai_url("/agents/autofill"), form)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn make_client() -> ApiClient {
        ApiClient::new(&Config {
            api_base_url: "http://localhost:0/api".into(),
            ai_service_url: "http://localhost:0".into(),
            state_path: "state.json".into(),
            rust_log: "info".into(),
            request_timeout_secs: 1,
        })
    }

    #[test]
    fn test_match_score_result_deserializes() {
        let json = r#"{
            "match_score": 0.82,
            "ats_score": 74,
            "strengths": ["Rust", "distributed systems"],
            "gaps": ["Kubernetes"],
            "keywords_to_add": ["observability"],
            "recommended_bullets": ["Led migration to async runtime"],
            "confidence": 0.9
        }"#;
        let result: MatchScoreResult = serde_json::from_str(json).unwrap();
        assert!((result.match_score - 0.82).abs() < f64::EPSILON);
        assert_eq!(result.ats_score, 74.0);
        assert_eq!(result.strengths.len(), 2);
        assert_eq!(result.confidence, Some(0.9));
    }

    #[test]
    fn test_match_score_result_tolerates_missing_lists() {
        let result: MatchScoreResult =
            serde_json::from_str(r#"{"match_score": 0.5, "ats_score": 60}"#).unwrap();
        assert!(result.strengths.is_empty());
        assert!(result.confidence.is_none());
    }

    #[test]
    fn test_tailored_resume_deserializes_with_changes() {
        let json = r#"{
            "tailored_resume": "SUMMARY\nShipped things.",
            "changes_made": {
                "words_added": 12,
                "words_removed": 4,
                "length_change_percent": 3.5,
                "top_keywords_added": ["Rust"]
            },
            "optimization_score": 0.7
        }"#;
        let result: TailoredResume = serde_json::from_str(json).unwrap();
        assert!(result.tailored_resume.starts_with("SUMMARY"));
        assert_eq!(result.changes_made.unwrap().words_added, 12);
    }

    #[test]
    fn test_generation_payload_shapes_deserialize() {
        let letter: CoverLetter =
            serde_json::from_str(r#"{"cover_letter": "Dear team"}"#).unwrap();
        assert_eq!(letter.cover_letter, "Dear team");
        let email: GeneratedEmail = serde_json::from_str(r#"{"email": "Hi"}"#).unwrap();
        assert_eq!(email.email, "Hi");
        let reply: ChatReply = serde_json::from_str(r#"{"response": "Sure"}"#).unwrap();
        assert_eq!(reply.response, "Sure");
        let titles: JobTitleSuggestions = serde_json::from_str(
            r#"{"job_titles": ["Backend Engineer"], "primary_title": "Backend Engineer"}"#,
        )
        .unwrap();
        assert_eq!(titles.job_titles.len(), 1);
    }

    #[test]
    fn test_tailor_options_defaults() {
        let options = TailorOptions::default();
        assert_eq!(options.style, "professional");
        assert_eq!(options.tone, "professional");
        assert_eq!(options.length, "standard");
    }

    #[tokio::test]
    async fn test_match_score_rejects_empty_job_description() {
        let client = make_client();
        let err = client
            .match_score(&UserProfile::default(), "   ", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_message() {
        let client = make_client();
        let err = client.assistant_chat("", None, &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
