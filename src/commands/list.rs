//! List Commands
//!
//! Frontend bindings for the remote list controllers.

use wasm_bindgen::prelude::*;
use serde::Serialize;
use crate::models::{ItemCard, ListKind, ListView};
use super::{invoke, rejection};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct OpenListArgs {
    kind: ListKind,
}

#[derive(Serialize)]
struct HandleArgs {
    handle: u64,
}

#[derive(Serialize)]
struct ItemArgs<'a> {
    handle: u64,
    id: &'a str,
}

// ========================
// Commands
// ========================

pub async fn open_list(kind: ListKind) -> Result<ListView, String> {
    let js_args = serde_wasm_bindgen::to_value(&OpenListArgs { kind }).map_err(|e| e.to_string())?;
    let result = invoke("open_list", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn close_list(handle: u64) -> Result<bool, String> {
    let js_args = serde_wasm_bindgen::to_value(&HandleArgs { handle }).map_err(|e| e.to_string())?;
    let result = invoke("close_list", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

async fn view_command(cmd: &str, handle: u64) -> Result<ListView, String> {
    let js_args = serde_wasm_bindgen::to_value(&HandleArgs { handle }).map_err(|e| e.to_string())?;
    let result = invoke(cmd, js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn list_snapshot(handle: u64) -> Result<ListView, String> {
    view_command("list_snapshot", handle).await
}

pub async fn refresh_list(handle: u64) -> Result<ListView, String> {
    view_command("refresh_list", handle).await
}

pub async fn load_more(handle: u64) -> Result<ListView, String> {
    view_command("load_more", handle).await
}

pub async fn remove_item(handle: u64, id: &str) -> Result<ListView, String> {
    let js_args = serde_wasm_bindgen::to_value(&ItemArgs { handle, id }).map_err(|e| e.to_string())?;
    let result = invoke("remove_item", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn find_item(handle: u64, id: &str) -> Result<Option<ItemCard>, String> {
    let js_args = serde_wasm_bindgen::to_value(&ItemArgs { handle, id }).map_err(|e| e.to_string())?;
    let result = invoke("find_item", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
