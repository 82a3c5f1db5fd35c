//! Global Application State
//!
//! The API client (and through it the session) plus the reactive signals
//! every page shares.

use std::sync::Arc;

use leptos::*;
use voiceagent_admin::views::notice::ACK_DURATION_MS;
use voiceagent_admin::{ApiClient, ApiResult, Notice, SessionContext, ViewError};

use super::storage::LocalStorageSessionStore;
use crate::api;

/// How long an error toast stays up
const ERROR_DURATION_MS: u32 = 5000;

const EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// Global application state provided to all components
#[derive(Clone)]
pub struct AppState {
    /// Client for the backend; its session context is the single source of
    /// truth for the token and business id
    pub client: ApiClient,
    /// Mirrors session presence so the route guard re-evaluates reactively
    pub authenticated: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Build the state, load any persisted session and provide it to the tree
pub fn provide_app_state() -> ApiResult<()> {
    let session = SessionContext::new(Arc::new(LocalStorageSessionStore));
    if let Err(e) = session.init() {
        web_sys::console::warn_1(&format!("Discarding stored session: {e}").into());
        if let Err(e) = session.clear() {
            web_sys::console::warn_1(&format!("Failed to remove stored session: {e}").into());
        }
    }

    let client = api::build_client(session)?;
    let state = AppState {
        authenticated: create_rw_signal(client.session().is_authenticated()),
        client,
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
    Ok(())
}

/// State provided by [`provide_app_state`]
pub fn expect_state() -> AppState {
    use_context::<AppState>().expect("AppState not found")
}

impl AppState {
    /// Business of the current session
    pub fn business_id(&self) -> Result<String, ViewError> {
        self.client
            .session()
            .business_id()
            .ok_or(ViewError::NoBusiness)
    }

    /// Show the "Saved!" acknowledgment for its usual two seconds
    pub fn show_saved(&self) {
        let notice = Notice::saved();
        self.show_success(&notice.message);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(ACK_DURATION_MS as u32, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(ERROR_DURATION_MS, move || {
            error_signal.set(None);
        })
        .forget();
    }

    /// Surface a failed page operation.
    ///
    /// Cancellations are dropped silently. A rejected token ends the session,
    /// which sends the guard back to the login page.
    pub fn report(&self, error: &ViewError) {
        if error.is_unauthorized() {
            self.end_session();
            self.show_error(EXPIRED_MESSAGE);
            return;
        }

        if let Some(notice) = Notice::from_error(error) {
            self.show_error(&notice.message);
        }
    }

    /// Session was just established by the login page
    pub fn signed_in(&self) {
        self.error.set(None);
        self.authenticated.set(true);
    }

    /// Forget the session in memory and in storage
    pub fn end_session(&self) {
        if let Err(e) = self.client.session().clear() {
            web_sys::console::warn_1(&format!("Failed to clear session: {e}").into());
        }
        self.authenticated.set(false);
    }
}
