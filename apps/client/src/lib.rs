//! Client core for the neilwe job-application assistant.
//!
//! The crate is the state-and-documents engine behind the UI shell:
//!
//! - [`store`]: the persistent application state container (auth, profile,
//!   preferences, recommendations, chat) with snapshot persistence and a
//!   fail-fast provider scope.
//! - [`onboarding`]: pure gating rules deriving which view the user may
//!   see from store state.
//! - [`document`]: the pipeline from raw AI text to typed sections, the
//!   editable preview, and the PDF/DOCX artifacts.
//! - [`services`]: thin async clients for the backend and AI collaborators.
//!
//! The shell owns rendering, routing, and user interaction; it provisions a
//! [`store::StoreProvider`] at startup, passes [`store::StoreHandle`]s down
//! the tree, and re-evaluates [`onboarding::route_for_path`] whenever state
//! changes.

pub mod config;
pub mod document;
pub mod errors;
pub mod models;
pub mod onboarding;
pub mod services;
pub mod store;
pub mod telemetry;

pub use config::Config;
pub use errors::AppError;
pub use store::{StoreHandle, StoreProvider};
