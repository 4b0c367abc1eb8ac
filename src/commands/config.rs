use wasm_bindgen::prelude::*;
use serde::Serialize;
use crate::models::AppConfig;
use super::{invoke, rejection};

#[derive(Serialize)]
struct ConfigArgs<'a> {
    config: &'a AppConfig,
}

#[derive(Serialize)]
struct LogArgs {
    limit: Option<usize>,
}

pub async fn get_config() -> Result<AppConfig, String> {
    let result = invoke("get_config", JsValue::NULL).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn save_config(config: &AppConfig) -> Result<AppConfig, String> {
    let js_args = serde_wasm_bindgen::to_value(&ConfigArgs { config }).map_err(|e| e.to_string())?;
    let result = invoke("save_config", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn recent_logs(limit: Option<usize>) -> Result<Vec<String>, String> {
    let js_args = serde_wasm_bindgen::to_value(&LogArgs { limit }).map_err(|e| e.to_string())?;
    let result = invoke("recent_logs", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
