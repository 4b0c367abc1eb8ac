//! List Commands
//!
//! Tauri commands that drive the remote list controllers.

use std::sync::Arc;

use remote_list::{HttpCollection, ListError, RemoteCollection, RemoteListController};
use tauri::State;

use crate::domain::ListKind;
use crate::remote::{endpoints_for, ItemCard, ListView};
use crate::AppState;

/// Log the technical detail, hand the user the short version
pub(crate) fn list_error(err: ListError) -> String {
    log::warn!("list operation failed: {}", err);
    err.user_message()
}

pub(crate) async fn current_view(state: &AppState, handle: u64) -> Result<ListView, String> {
    let (kind, controller) = state.lists.get(handle).await?;
    let host = state.config.lock().await.server_host();
    Ok(ListView::new(handle, kind, controller.snapshot().await, host.as_deref()))
}

#[tauri::command]
pub async fn open_list(
    kind: ListKind,
    state: State<'_, AppState>,
) -> Result<ListView, String> {
    let (config, client) = state.remote().await;
    let collection = HttpCollection::new(client, &config.server_url, endpoints_for(kind))
        .map_err(list_error)?;
    let collection: Arc<dyn RemoteCollection> = Arc::new(collection);
    let controller = Arc::new(RemoteListController::new(collection, config.page_size));

    let handle = state.lists.open(kind, controller).await;
    current_view(&state, handle).await
}

#[tauri::command]
pub async fn close_list(
    handle: u64,
    state: State<'_, AppState>,
) -> Result<bool, String> {
    Ok(state.lists.close(handle).await)
}

#[tauri::command]
pub async fn list_snapshot(
    handle: u64,
    state: State<'_, AppState>,
) -> Result<ListView, String> {
    current_view(&state, handle).await
}

#[tauri::command]
pub async fn refresh_list(
    handle: u64,
    state: State<'_, AppState>,
) -> Result<ListView, String> {
    let (_, controller) = state.lists.get(handle).await?;
    controller.refresh().await.map_err(list_error)?;
    current_view(&state, handle).await
}

#[tauri::command]
pub async fn load_more(
    handle: u64,
    state: State<'_, AppState>,
) -> Result<ListView, String> {
    let (_, controller) = state.lists.get(handle).await?;
    controller.load_more().await.map_err(list_error)?;
    current_view(&state, handle).await
}

#[tauri::command]
pub async fn remove_item(
    handle: u64,
    id: String,
    state: State<'_, AppState>,
) -> Result<ListView, String> {
    let (_, controller) = state.lists.get(handle).await?;
    controller.remove(&id).await.map_err(list_error)?;
    let _ = rolling_logger::info(&format!("Deleted item {}", id));
    current_view(&state, handle).await
}

#[tauri::command]
pub async fn find_item(
    handle: u64,
    id: String,
    state: State<'_, AppState>,
) -> Result<Option<ItemCard>, String> {
    let (_, controller) = state.lists.get(handle).await?;
    let host = state.config.lock().await.server_host();
    Ok(controller
        .find(&id)
        .await
        .map(|item| ItemCard::from_item(&item, host.as_deref())))
}
