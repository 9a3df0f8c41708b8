use chrono::Utc;

use crate::models::{
    ChatMessage, ChatRole, CvExtract, Job, JobPreferences, UploadedCv, User, UserProfile,
};

/// The assistant's standing greeting. Chat history is seeded with exactly
/// this message and [`crate::store::StoreHandle::clear_chat`] resets to it.
pub const WELCOME_MESSAGE: &str = "Hi, I am your personal assistant\n\n\
Task I can assist you with:\n\
1. Find jobs where you are top candidate\n\
2. Assist with interview questions\n\
3. Provide insights on specific jobs\n\
4. Help with app navigation";

pub fn welcome_message() -> ChatMessage {
    ChatMessage {
        role: ChatRole::Assistant,
        content: WELCOME_MESSAGE.to_string(),
        timestamp: Utc::now().timestamp_millis(),
    }
}

/// Full in-memory application state.
///
/// `uploaded_cv` is a transient file handle and never reaches the persisted
/// snapshot; everything else except `is_loading` does.
#[derive(Debug, Clone)]
pub struct StoreState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub profile: Option<UserProfile>,
    pub job_preferences: Option<JobPreferences>,
    pub recommended_jobs: Vec<Job>,
    pub chat_messages: Vec<ChatMessage>,
    pub uploaded_cv: Option<UploadedCv>,
    pub extracted_cv_data: Option<CvExtract>,
    pub is_loading: bool,
}

impl StoreState {
    /// The pre-hydration default: empty entities, seeded welcome message,
    /// `is_loading` raised until the snapshot load settles.
    pub fn seed() -> Self {
        StoreState {
            user: None,
            is_authenticated: false,
            profile: None,
            job_preferences: None,
            recommended_jobs: Vec::new(),
            chat_messages: vec![welcome_message()],
            uploaded_cv: None,
            extracted_cv_data: None,
            is_loading: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_state_has_single_assistant_welcome() {
        let state = StoreState::seed();
        assert_eq!(state.chat_messages.len(), 1);
        assert_eq!(state.chat_messages[0].role, ChatRole::Assistant);
        assert_eq!(state.chat_messages[0].content, WELCOME_MESSAGE);
        assert!(state.is_loading);
    }

    #[test]
    fn test_seed_state_entities_are_empty() {
        let state = StoreState::seed();
        assert!(state.user.is_none());
        assert!(!state.is_authenticated);
        assert!(state.profile.is_none());
        assert!(state.job_preferences.is_none());
        assert!(state.recommended_jobs.is_empty());
        assert!(state.uploaded_cv.is_none());
        assert!(state.extracted_cv_data.is_none());
    }
}
