//! Upload Commands

use std::collections::BTreeMap;

use wasm_bindgen::prelude::*;
use serde::Serialize;
use crate::models::ListView;
use super::{invoke, rejection};

#[derive(Serialize)]
struct UploadArgs<'a> {
    handle: u64,
    path: &'a str,
    fields: &'a BTreeMap<String, String>,
}

/// Native file dialog; `None` when cancelled
pub async fn pick_image() -> Result<Option<String>, String> {
    let result = invoke("pick_image", JsValue::NULL).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn upload_item(handle: u64, path: &str, fields: &BTreeMap<String, String>) -> Result<ListView, String> {
    // Plain object instead of a JS Map, so the fields survive JSON encoding
    let js_args = UploadArgs { handle, path, fields }
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| e.to_string())?;
    let result = invoke("upload_item", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
