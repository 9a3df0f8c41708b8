//! Thin async clients for the external collaborators.
//!
//! ARCHITECTURAL RULE: no other module issues HTTP. Every backend and AI
//! service call goes through [`ApiClient`], which owns the error-surface
//! contract: a non-2xx response yields the body's error/message text, or a
//! generic `HTTP <status>` when the body is empty.

pub mod ai;
pub mod auth;
pub mod jobs;
pub mod profile;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::errors::AppError;

pub use ai::{
    ChatReply, CoverLetter, GeneratedEmail, GenerationService, JobTitleSuggestions,
    MatchScoreResult, TailorOptions, TailoredResume,
};

/// The single HTTP entry point for the backend API and the AI service.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    api_base: String,
    ai_base: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        ApiClient {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            api_base: config.api_base_url.trim_end_matches('/').to_string(),
            ai_base: config.ai_service_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn api_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.api_base)
    }

    pub(crate) fn ai_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.ai_base)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let response = self.http.get(url).send().await?;
        handle_response(response).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, AppError> {
        let response = self.http.post(url).json(body).send().await?;
        handle_response(response).await
    }

    /// PUT whose response body is irrelevant; only the status is checked.
    pub(crate) async fn put_no_content(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<(), AppError> {
        let response = self.http.put(url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("service call failed with {status}: {body}");
            return Err(AppError::Service {
                status: Some(status.as_u16()),
                message: error_message_from_body(status.as_u16(), &body),
            });
        }
        Ok(())
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, AppError> {
        let response = self.http.post(url).multipart(form).send().await?;
        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("service call failed with {status}: {body}");
        return Err(AppError::Service {
            status: Some(status.as_u16()),
            message: error_message_from_body(status.as_u16(), &body),
        });
    }
    Ok(response.json::<T>().await?)
}

/// Extracts a human-readable message from an error response body.
fn error_message_from_body(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("HTTP {status}");
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["error", "message", "detail"] {
            match value.get(key) {
                Some(serde_json::Value::String(text)) if !text.is_empty() => return text.clone(),
                Some(nested @ serde_json::Value::Object(_)) => {
                    if let Some(text) = nested.get("message").and_then(|m| m.as_str()) {
                        return text.to_string();
                    }
                }
                _ => {}
            }
        }
    }
    trimmed.to_string()
}

/// Pre-flight input check: fails before any network I/O is issued.
pub(crate) fn require_non_empty(value: &str, label: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{label} is required")));
    }
    Ok(())
}
