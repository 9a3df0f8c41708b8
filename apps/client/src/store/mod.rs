//! Persistent application state store.
//!
//! One mutable state container shared by the whole shell. Every mutation is
//! a full-field replacement or an atomic shallow merge taken under the state
//! lock, and the durable snapshot is rewritten before the lock is released,
//! so the persisted form always reflects the most recent successful mutation.
//!
//! # Provider scope
//! The store is owned by a [`StoreProvider`]; consumers hold [`StoreHandle`]s.
//! A handle used after its provider is gone fails fast with
//! [`AppError::OutOfScope`], a usage error rather than a data condition.

pub mod persistence;
pub mod state;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::Utc;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::{
    ChatMessage, ChatRole, CvExtract, Job, JobPreferences, ProfileUpdate, UploadedCv, User,
    UserProfile,
};
use crate::store::persistence::{FileStorage, PersistedState, StorageBackend};
use crate::store::state::{welcome_message, StoreState};

struct StoreInner {
    state: Mutex<StoreState>,
    storage: Box<dyn StorageBackend>,
}

impl StoreInner {
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rewrites the durable snapshot from the locked state. Storage faults
    /// are absorbed here: the in-memory state stays authoritative.
    fn persist_locked(&self, state: &StoreState) {
        let snapshot = match serde_json::to_string(&PersistedState::capture(state)) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("failed to serialize state snapshot: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.save(&snapshot) {
            tracing::error!("failed to write state snapshot: {e}");
        }
    }

    /// One-shot snapshot load. Runs before any consumer can read state;
    /// always ends with `is_loading = false`.
    fn hydrate(&self) {
        let mut state = self.lock();
        match self.storage.load() {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedState>(&raw) {
                Ok(saved) => saved.apply(&mut state),
                Err(e) => tracing::error!("failed to parse saved state snapshot: {e}"),
            },
            Ok(None) => {}
            Err(e) => tracing::error!("failed to read saved state snapshot: {e}"),
        }
        state.is_loading = false;
    }
}

/// Owns the store for a well-defined scope (typically the shell's lifetime).
pub struct StoreProvider {
    inner: Arc<StoreInner>,
}

impl StoreProvider {
    /// Creates the store over the given storage backend and hydrates it.
    pub fn provision(storage: Box<dyn StorageBackend>) -> Self {
        let inner = Arc::new(StoreInner {
            state: Mutex::new(StoreState::seed()),
            storage,
        });
        inner.hydrate();
        StoreProvider { inner }
    }

    /// File-backed store at the configured snapshot path.
    pub fn from_config(config: &Config) -> Self {
        Self::provision(Box::new(FileStorage::new(&config.state_path)))
    }

    pub fn handle(&self) -> StoreHandle {
        StoreHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// Cheap, clonable access point to the store. All state operations live here.
#[derive(Clone)]
pub struct StoreHandle {
    inner: Weak<StoreInner>,
}

impl StoreHandle {
    fn upgrade(&self) -> Result<Arc<StoreInner>, AppError> {
        self.inner.upgrade().ok_or(AppError::OutOfScope)
    }

    /// Runs a mutation under the lock, then rewrites the snapshot.
    fn mutate<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> Result<R, AppError> {
        let inner = self.upgrade()?;
        let mut state = inner.lock();
        let result = f(&mut state);
        inner.persist_locked(&state);
        Ok(result)
    }

    /// Mutation that must not touch the snapshot (transient fields only).
    fn mutate_transient<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> Result<R, AppError> {
        let inner = self.upgrade()?;
        let mut state = inner.lock();
        Ok(f(&mut state))
    }

    /// Owned copy of the full state. No torn reads: taken under the lock.
    pub fn snapshot(&self) -> Result<StoreState, AppError> {
        let inner = self.upgrade()?;
        let state = inner.lock();
        Ok(state.clone())
    }

    pub fn login(&self, user: User) -> Result<(), AppError> {
        self.mutate(|state| {
            state.user = Some(user);
            state.is_authenticated = true;
        })
    }

    /// Erases the durable snapshot entirely and resets to the seeded
    /// defaults (no reload needed, so `is_loading` stays down).
    pub fn logout(&self) -> Result<(), AppError> {
        let inner = self.upgrade()?;
        let mut state = inner.lock();
        if let Err(e) = inner.storage.clear() {
            tracing::error!("failed to erase state snapshot on logout: {e}");
        }
        *state = StoreState::seed();
        state.is_loading = false;
        Ok(())
    }

    pub fn set_profile(&self, profile: Option<UserProfile>) -> Result<(), AppError> {
        self.mutate(|state| state.profile = profile)
    }

    /// Shallow merge into the existing profile. A documented no-op when no
    /// profile exists yet; this never creates one.
    pub fn update_profile(&self, update: ProfileUpdate) -> Result<(), AppError> {
        self.mutate(|state| {
            if let Some(profile) = state.profile.as_mut() {
                update.apply_to(profile);
            }
        })
    }

    pub fn set_job_preferences(&self, prefs: JobPreferences) -> Result<(), AppError> {
        self.mutate(|state| state.job_preferences = Some(prefs))
    }

    pub fn set_recommended_jobs(&self, jobs: Vec<Job>) -> Result<(), AppError> {
        self.mutate(|state| state.recommended_jobs = jobs)
    }

    /// Appends a message with a store-assigned timestamp. Timestamps are
    /// non-decreasing across appends even if the wall clock steps backwards.
    pub fn add_chat_message(
        &self,
        role: ChatRole,
        content: impl Into<String>,
    ) -> Result<ChatMessage, AppError> {
        let content = content.into();
        self.mutate(|state| {
            let now = Utc::now().timestamp_millis();
            let floor = state
                .chat_messages
                .last()
                .map(|m| m.timestamp)
                .unwrap_or(i64::MIN);
            let message = ChatMessage {
                role,
                content,
                timestamp: now.max(floor),
            };
            state.chat_messages.push(message.clone());
            message
        })
    }

    /// Discards all history, keeping exactly the seeded welcome message.
    pub fn clear_chat(&self) -> Result<(), AppError> {
        self.mutate(|state| state.chat_messages = vec![welcome_message()])
    }

    pub fn set_uploaded_cv(&self, cv: Option<UploadedCv>) -> Result<(), AppError> {
        self.mutate_transient(|state| state.uploaded_cv = cv)
    }

    pub fn set_extracted_cv_data(&self, data: Option<CvExtract>) -> Result<(), AppError> {
        self.mutate(|state| state.extracted_cv_data = data)
    }
}
