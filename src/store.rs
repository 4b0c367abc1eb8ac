//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use crate::models::{AppConfig, Preferences, Session, UserProfile};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, if any
    pub user: Option<UserProfile>,
    pub preferences: Preferences,
    /// Loaded lazily by the settings panel
    pub config: Option<AppConfig>,
    /// False until the stored session has been read
    pub session_loaded: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace user and preferences with what the backend returned
pub fn store_set_session(store: &AppStore, session: Session) {
    store.user().set(session.user);
    store.preferences().set(session.preferences);
    store.session_loaded().set(true);
}
