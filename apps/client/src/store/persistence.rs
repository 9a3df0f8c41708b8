//! Durable snapshot format and storage backends.
//!
//! The snapshot is one JSON object holding exactly the seven persisted
//! fields. An absent snapshot is a valid empty state; a corrupt one is
//! recovered from by falling back to defaults (the store logs and moves on).

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{ChatMessage, CvExtract, Job, JobPreferences, User, UserProfile};
use crate::store::state::{welcome_message, StoreState};

/// Key-value durable storage for the state snapshot.
///
/// The client-storage analogue: one fixed slot, last write wins.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<Option<String>, AppError>;
    fn save(&self, snapshot: &str) -> Result<(), AppError>;
    fn clear(&self) -> Result<(), AppError>;
}

/// File-backed storage: the snapshot lives as a JSON file at a fixed path.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }
}

impl StorageBackend for FileStorage {
    fn load(&self) -> Result<Option<String>, AppError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, snapshot: &str) -> Result<(), AppError> {
        std::fs::write(&self.path, snapshot)
            .map_err(|e| AppError::Storage(format!("write {}: {e}", self.path.display())))
    }

    fn clear(&self) -> Result<(), AppError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// In-memory storage for tests and ephemeral shells. Clones share one slot.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw snapshot, if any. Test hook.
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Option<String>, AppError> {
        Ok(self.raw())
    }

    fn save(&self, snapshot: &str) -> Result<(), AppError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

fn default_chat_messages() -> Vec<ChatMessage> {
    vec![welcome_message()]
}

/// The exact persisted field set. Fields absent from a stored snapshot take
/// the same defaults as a fresh state, so deserializing and applying is the
/// shallow merge the load contract requires.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PersistedState {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub job_preferences: Option<JobPreferences>,
    #[serde(default)]
    pub recommended_jobs: Vec<Job>,
    #[serde(default = "default_chat_messages")]
    pub chat_messages: Vec<ChatMessage>,
    #[serde(default, rename = "extractedCVData")]
    pub extracted_cv_data: Option<CvExtract>,
}

impl PersistedState {
    pub fn capture(state: &StoreState) -> Self {
        PersistedState {
            user: state.user.clone(),
            is_authenticated: state.is_authenticated,
            profile: state.profile.clone(),
            job_preferences: state.job_preferences.clone(),
            recommended_jobs: state.recommended_jobs.clone(),
            chat_messages: state.chat_messages.clone(),
            extracted_cv_data: state.extracted_cv_data.clone(),
        }
    }

    /// Overlays the parsed snapshot onto `state`. Files are never
    /// restorable, so `uploaded_cv` is forced back to `None`.
    pub fn apply(self, state: &mut StoreState) {
        state.user = self.user;
        state.is_authenticated = self.is_authenticated;
        state.profile = self.profile;
        state.job_preferences = self.job_preferences;
        state.recommended_jobs = self.recommended_jobs;
        state.chat_messages = self.chat_messages;
        state.extracted_cv_data = self.extracted_cv_data;
        state.uploaded_cv = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatRole;

    #[test]
    fn test_file_storage_absent_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("state.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("state.json"));
        storage.save(r#"{"isAuthenticated":true}"#).unwrap();
        assert_eq!(
            storage.load().unwrap().as_deref(),
            Some(r#"{"isAuthenticated":true}"#)
        );
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
        // Clearing an already-absent snapshot is not an error.
        storage.clear().unwrap();
    }

    #[test]
    fn test_snapshot_uses_storage_key_names() {
        let state = StoreState::seed();
        let json = serde_json::to_string(&PersistedState::capture(&state)).unwrap();
        assert!(json.contains("\"isAuthenticated\""));
        assert!(json.contains("\"jobPreferences\""));
        assert!(json.contains("\"recommendedJobs\""));
        assert!(json.contains("\"chatMessages\""));
        assert!(json.contains("\"extractedCVData\""));
        assert!(!json.contains("uploadedCV"), "file handles are not persisted");
        assert!(!json.contains("isLoading"));
    }

    #[test]
    fn test_missing_chat_messages_defaults_to_welcome() {
        let parsed: PersistedState = serde_json::from_str(r#"{"isAuthenticated":true}"#).unwrap();
        assert_eq!(parsed.chat_messages.len(), 1);
        assert_eq!(parsed.chat_messages[0].role, ChatRole::Assistant);
    }

    #[test]
    fn test_apply_forces_uploaded_cv_to_none() {
        let mut state = StoreState::seed();
        state.uploaded_cv = Some(crate::models::UploadedCv {
            file_name: "cv.pdf".into(),
            mime_type: "application/pdf".into(),
            data: bytes::Bytes::from_static(b"%PDF"),
        });
        let parsed: PersistedState = serde_json::from_str("{}").unwrap();
        parsed.apply(&mut state);
        assert!(state.uploaded_cv.is_none());
    }
}
