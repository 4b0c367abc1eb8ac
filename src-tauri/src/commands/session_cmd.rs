//! Session Commands
//!
//! Tauri commands for the stored user session and preferences.

use tauri::State;

use crate::domain::{Preferences, Session};
use crate::AppState;

#[tauri::command]
pub async fn load_session(
    state: State<'_, AppState>,
) -> Result<Session, String> {
    state.session.load().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_preferences(
    preferences: Preferences,
    state: State<'_, AppState>,
) -> Result<Session, String> {
    state
        .session
        .save_preferences(&preferences)
        .await
        .map_err(|e| e.to_string())?;
    state.session.load().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn logout(
    state: State<'_, AppState>,
) -> Result<Session, String> {
    state.session.clear_user().await.map_err(|e| e.to_string())?;
    let _ = rolling_logger::info("User signed out");
    state.session.load().await.map_err(|e| e.to_string())
}
