//! App Configuration
//!
//! Server address and paging settings, stored as JSON in the app data dir.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "wayfarer_config.json";
pub const DEFAULT_SERVER_URL: &str = "http://192.168.18.43:2510";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub page_size: u32,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            page_size: remote_list::DEFAULT_PAGE_SIZE,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn path_in(app_dir: &Path) -> PathBuf {
        app_dir.join(CONFIG_FILE)
    }

    /// Read the config file; a missing or broken file yields defaults
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str::<AppConfig>(&raw) {
            Ok(config) if config.validate().is_ok() => config,
            Ok(_) | Err(_) => {
                log::warn!("Ignoring invalid config at {}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        self.validate()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write config: {}", e))
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.server_url)
            .map_err(|e| format!("Invalid server address {}: {}", self.server_url, e))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(format!("Server address must be an http(s) URL: {}", self.server_url));
        }
        if !(1..=100).contains(&self.page_size) {
            return Err("Page size must be between 1 and 100".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be positive".to_string());
        }
        Ok(())
    }

    /// Host used to replace loopback hosts in media URLs
    pub fn server_host(&self) -> Option<String> {
        Url::parse(&self.server_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }

    pub fn http_client(&self) -> Result<reqwest::Client, String> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))
    }
}
