//! Config Commands

use tauri::State;

use crate::config::AppConfig;
use crate::AppState;

#[tauri::command]
pub async fn get_config(
    state: State<'_, AppState>,
) -> Result<AppConfig, String> {
    Ok(state.config.lock().await.clone())
}

/// Persist and apply; lists opened against the old server are closed
#[tauri::command]
pub async fn save_config(
    config: AppConfig,
    state: State<'_, AppState>,
) -> Result<AppConfig, String> {
    config.save(&state.config_path)?;
    let client = config.http_client()?;

    *state.http.lock().await = client;
    *state.config.lock().await = config.clone();
    state.lists.close_all().await;

    let _ = rolling_logger::info(&format!("Server changed to {}", config.server_url));
    Ok(config)
}
