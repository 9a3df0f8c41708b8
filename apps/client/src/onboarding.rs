//! Onboarding gating: derives which view the user may see from store state.
//!
//! Pure functions over a state snapshot; the shell re-evaluates them on
//! every store change. Nothing here performs navigation or I/O.
//!
//! # Gate order
//! 1. hydration pending → neutral loading, no redirect decision
//! 2. unauthenticated → login (public paths excepted)
//! 3. no CV on file → CV upload
//! 4. CV but incomplete preferences → preferences (main-app paths only)
//! 5. otherwise → allow

use crate::models::{JobPreferences, UserProfile};
use crate::store::state::StoreState;

pub mod paths {
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const UPLOAD_CV: &str = "/upload-cv";
    pub const PREFERENCES: &str = "/preferences";
    pub const HOME: &str = "/home";
    pub const DASHBOARD: &str = "/dashboard";
    pub const PAST_APPLICATIONS: &str = "/past-applications";
}

/// Entry points reachable without authentication.
const PUBLIC_PATHS: &[&str] = &[paths::LOGIN, paths::SIGNUP];

/// Views that require completed onboarding before they render.
const MAIN_APP_PATHS: &[&str] = &[paths::HOME, paths::DASHBOARD, paths::PAST_APPLICATIONS];

/// Outcome of evaluating the gate for one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Hydration has not settled; render a neutral loading state.
    Loading,
    Allow,
    Redirect(&'static str),
}

/// The derived onboarding progression (unauthenticated is handled by the
/// login redirect, not modeled as a step).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Loading,
    NeedsCv,
    NeedsPreferences,
    Ready,
}

/// A CV is on file once the profile carries a stored file name or any
/// non-empty extracted resume text.
pub fn has_cv(profile: Option<&UserProfile>) -> bool {
    profile.is_some_and(|p| {
        p.resume_file_name.is_some() || p.resume_text.as_deref().is_some_and(|t| !t.is_empty())
    })
}

/// Preferences are complete once a role is set and at least one contract
/// type is chosen.
pub fn has_preferences(prefs: Option<&JobPreferences>) -> bool {
    prefs.is_some_and(|p| !p.preferred_role.is_empty() && !p.contract_types.is_empty())
}

/// Evaluates the gate for the given path. Re-run on every state change.
pub fn route_for_path(state: &StoreState, path: &str) -> RouteDecision {
    if state.is_loading {
        return RouteDecision::Loading;
    }
    if !state.is_authenticated {
        if PUBLIC_PATHS.contains(&path) {
            return RouteDecision::Allow;
        }
        return RouteDecision::Redirect(paths::LOGIN);
    }

    let cv_done = has_cv(state.profile.as_ref());
    let prefs_done = has_preferences(state.job_preferences.as_ref());

    if !cv_done && path != paths::UPLOAD_CV {
        return RouteDecision::Redirect(paths::UPLOAD_CV);
    }
    if cv_done && !prefs_done && MAIN_APP_PATHS.contains(&path) {
        return RouteDecision::Redirect(paths::PREFERENCES);
    }
    RouteDecision::Allow
}

/// Where to land right after a successful login/signup: always exactly one
/// of CV upload, preferences, or home.
pub fn post_login_destination(state: &StoreState) -> &'static str {
    if !has_cv(state.profile.as_ref()) {
        paths::UPLOAD_CV
    } else if !has_preferences(state.job_preferences.as_ref()) {
        paths::PREFERENCES
    } else {
        paths::HOME
    }
}

/// The onboarding state machine, derived from the same fields as the gate.
pub fn onboarding_step(state: &StoreState) -> OnboardingStep {
    if state.is_loading {
        OnboardingStep::Loading
    } else if !has_cv(state.profile.as_ref()) {
        OnboardingStep::NeedsCv
    } else if !has_preferences(state.job_preferences.as_ref()) {
        OnboardingStep::NeedsPreferences
    } else {
        OnboardingStep::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;

    fn make_state() -> StoreState {
        let mut state = StoreState::seed();
        state.is_loading = false;
        state.is_authenticated = true;
        state
    }

    fn profile_with_resume(text: &str) -> UserProfile {
        UserProfile {
            resume_text: Some(text.to_string()),
            ..Default::default()
        }
    }

    fn complete_prefs() -> crate::models::JobPreferences {
        crate::models::JobPreferences {
            preferred_role: "Eng".into(),
            contract_types: vec!["full-time".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_loading_state_never_redirects() {
        let mut state = make_state();
        state.is_loading = true;
        state.is_authenticated = false;
        assert_eq!(route_for_path(&state, paths::HOME), RouteDecision::Loading);
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let mut state = make_state();
        state.is_authenticated = false;
        assert_eq!(
            route_for_path(&state, paths::DASHBOARD),
            RouteDecision::Redirect(paths::LOGIN)
        );
    }

    #[test]
    fn test_unauthenticated_allowed_on_public_paths() {
        let mut state = make_state();
        state.is_authenticated = false;
        assert_eq!(route_for_path(&state, paths::LOGIN), RouteDecision::Allow);
        assert_eq!(route_for_path(&state, paths::SIGNUP), RouteDecision::Allow);
    }

    #[test]
    fn test_empty_resume_text_redirects_to_upload() {
        let mut state = make_state();
        state.profile = Some(profile_with_resume(""));
        assert_eq!(
            route_for_path(&state, paths::HOME),
            RouteDecision::Redirect(paths::UPLOAD_CV)
        );
    }

    #[test]
    fn test_missing_profile_redirects_to_upload() {
        let state = make_state();
        assert_eq!(
            route_for_path(&state, paths::DASHBOARD),
            RouteDecision::Redirect(paths::UPLOAD_CV)
        );
    }

    #[test]
    fn test_upload_path_itself_is_reachable_without_cv() {
        let state = make_state();
        assert_eq!(route_for_path(&state, paths::UPLOAD_CV), RouteDecision::Allow);
    }

    #[test]
    fn test_cv_without_preferences_redirects_main_app_to_preferences() {
        let mut state = make_state();
        state.profile = Some(profile_with_resume("x"));
        for path in [paths::HOME, paths::DASHBOARD, paths::PAST_APPLICATIONS] {
            assert_eq!(
                route_for_path(&state, path),
                RouteDecision::Redirect(paths::PREFERENCES),
                "path {path} should gate on preferences"
            );
        }
        // The preferences page itself must stay reachable.
        assert_eq!(
            route_for_path(&state, paths::PREFERENCES),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_fully_onboarded_is_allowed() {
        let mut state = make_state();
        state.profile = Some(profile_with_resume("x"));
        state.job_preferences = Some(complete_prefs());
        assert_eq!(route_for_path(&state, paths::HOME), RouteDecision::Allow);
    }

    #[test]
    fn test_resume_file_name_alone_counts_as_cv() {
        let profile = UserProfile {
            resume_file_name: Some("cv.pdf".into()),
            ..Default::default()
        };
        assert!(has_cv(Some(&profile)));
    }

    #[test]
    fn test_preferences_require_role_and_contract_types() {
        let mut prefs = complete_prefs();
        assert!(has_preferences(Some(&prefs)));
        prefs.contract_types.clear();
        assert!(!has_preferences(Some(&prefs)));
        let mut prefs = complete_prefs();
        prefs.preferred_role.clear();
        assert!(!has_preferences(Some(&prefs)));
    }

    #[test]
    fn test_post_login_destination_progression() {
        let mut state = make_state();
        assert_eq!(post_login_destination(&state), paths::UPLOAD_CV);
        state.profile = Some(profile_with_resume("x"));
        assert_eq!(post_login_destination(&state), paths::PREFERENCES);
        state.job_preferences = Some(complete_prefs());
        assert_eq!(post_login_destination(&state), paths::HOME);
    }

    #[test]
    fn test_onboarding_step_machine() {
        let mut state = make_state();
        state.is_loading = true;
        assert_eq!(onboarding_step(&state), OnboardingStep::Loading);
        state.is_loading = false;
        assert_eq!(onboarding_step(&state), OnboardingStep::NeedsCv);
        state.profile = Some(profile_with_resume("x"));
        assert_eq!(onboarding_step(&state), OnboardingStep::NeedsPreferences);
        state.job_preferences = Some(complete_prefs());
        assert_eq!(onboarding_step(&state), OnboardingStep::Ready);
    }
}
