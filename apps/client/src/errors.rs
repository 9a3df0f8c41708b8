use thiserror::Error;

/// Application-level error type.
///
/// The shell maps these to user-visible notices; only `OutOfScope` is a
/// programming error that should surface loudly in development.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store accessed after (or before) its provider scope: a usage error,
    /// never a recoverable data condition.
    #[error("state store accessed outside its provider scope")]
    OutOfScope,

    #[error("Validation error: {0}")]
    Validation(String),

    /// A collaborator call failed or returned non-2xx. `message` carries the
    /// human-readable text extracted from the response body.
    #[error("Service error: {message}")]
    Service { status: Option<u16>, message: String },

    /// Durable-storage fault. The store absorbs these after logging; the
    /// variant exists for the storage backends themselves.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Building a downloadable artifact failed (PDF/DOCX assembly).
    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Constructor for service failures with a known HTTP status.
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        AppError::Service {
            status: Some(status),
            message: message.into(),
        }
    }

    /// True for errors the shell should treat as fatal (fail-fast) rather
    /// than as a transient notice.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::OutOfScope)
    }
}
