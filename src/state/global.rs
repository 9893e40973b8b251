//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::state::session::{self, SessionUser};

/// Global application state provided to all components
#[derive(Clone)]
pub struct AppState {
    /// Signed-in user, restored from the stored session on startup
    pub current_user: RwSignal<Option<SessionUser>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_app_state() {
    let restored = if session::is_authenticated() {
        session::load_user()
    } else {
        None
    };

    let state = AppState {
        current_user: create_rw_signal(restored),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl AppState {
    pub fn sign_in(&self, user: SessionUser) {
        self.current_user.set(Some(user));
    }

    pub fn sign_out(&self) {
        session::clear();
        self.current_user.set(None);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
