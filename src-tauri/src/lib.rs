//! Wayfarer Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Local storage (SQLite key-value store, session)
//! - remote: Server clients and the registry of open lists
//! - commands: Tauri command handlers

use std::path::PathBuf;
use tauri::Manager;
use tokio::sync::Mutex;

mod config;
mod domain;
mod repository;
mod remote;
mod commands;

use config::AppConfig;
use remote::ListRegistry;
use repository::{init_db, SessionStore, SqliteKeyValueStore};

/// Application state shared across commands
pub struct AppState {
    pub session: SessionStore<SqliteKeyValueStore>,
    pub config: Mutex<AppConfig>,
    pub config_path: PathBuf,
    /// Rebuilt whenever the timeout setting changes
    pub http: Mutex<reqwest::Client>,
    pub lists: ListRegistry,
}

impl AppState {
    /// Current config together with a client built for it
    pub async fn remote(&self) -> (AppConfig, reqwest::Client) {
        let config = self.config.lock().await.clone();
        let client = self.http.lock().await.clone();
        (config, client)
    }
}

/// Get the app data directory, creating it on first start
fn get_app_dir(app_handle: &tauri::AppHandle) -> Result<PathBuf, String> {
    let app_dir = app_handle
        .path()
        .app_data_dir()
        .map_err(|e| format!("No app data dir: {}", e))?;
    std::fs::create_dir_all(&app_dir).map_err(|e| e.to_string())?;
    Ok(app_dir)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|_app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = _app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            // Initialize logging
            if let Err(e) = rolling_logger::init_logger(app_handle.path().app_log_dir()?, "Wayfarer") {
                eprintln!("Failed to init rolling logger: {}", e);
            }

            let app_dir = get_app_dir(&app_handle)?;
            let db_path = app_dir.join("wayfarer.db");
            let config_path = AppConfig::path_in(&app_dir);

            let config = AppConfig::load(&config_path);
            let http = config.http_client()?;
            let _ = rolling_logger::info(&format!("Server: {}", config.server_url));

            // Must be ready before the first command runs
            let db_state = tauri::async_runtime::block_on(init_db(&db_path)).map_err(|e| {
                let _ = rolling_logger::error(&format!("DB init failed: {}", e));
                e
            })?;
            let _ = rolling_logger::info(&format!("DB ready at {}", db_state.path.display()));

            app.manage(AppState {
                session: SessionStore::new(SqliteKeyValueStore::new(db_state.conn.clone())),
                config: Mutex::new(config),
                config_path,
                http: Mutex::new(http),
                lists: ListRegistry::new(),
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Lists
            commands::open_list,
            commands::close_list,
            commands::list_snapshot,
            commands::refresh_list,
            commands::load_more,
            commands::remove_item,
            commands::find_item,
            // Uploads
            commands::pick_image,
            commands::upload_item,
            // Session + auth
            commands::load_session,
            commands::save_preferences,
            commands::login,
            commands::signup,
            commands::logout,
            // Settings
            commands::get_config,
            commands::save_config,
            commands::recent_logs,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
