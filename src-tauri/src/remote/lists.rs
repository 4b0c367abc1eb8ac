//! Open Lists
//!
//! Registry of the list controllers that mounted screens are bound to, plus
//! the card/view DTOs handed to the frontend.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use remote_list::{CollectionEndpoints, Item, ListSnapshot, RemoteListController};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::ListKind;

/// Server routes of each collection
pub fn endpoints_for(kind: ListKind) -> CollectionEndpoints {
    match kind {
        ListKind::Gallery => CollectionEndpoints::rest("images/uploads"),
        ListKind::Offers => CollectionEndpoints {
            list: "offerImages/offerImages".to_string(),
            create: "offerImages/uploads".to_string(),
            delete: "offerImages/delete/{id}".to_string(),
            // The offers route returns every offer in one response
            paged: false,
        },
    }
}

/// One item as the frontend renders it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCard {
    pub id: String,
    /// Already rewritten for the configured server host
    pub media_url: String,
    pub attributes: BTreeMap<String, String>,
}

impl ItemCard {
    pub fn from_item(item: &Item, server_host: Option<&str>) -> Self {
        let media_url = match server_host {
            Some(host) => item.media_url_for(host),
            None => item.media_url.clone(),
        };
        Self {
            id: item.id.clone(),
            media_url,
            attributes: item.text_attributes(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub handle: u64,
    pub kind: ListKind,
    pub items: Vec<ItemCard>,
    pub page: u32,
    pub has_more: bool,
    pub loading_more: bool,
}

impl ListView {
    pub fn new(handle: u64, kind: ListKind, snapshot: ListSnapshot, server_host: Option<&str>) -> Self {
        Self {
            handle,
            kind,
            items: snapshot
                .items
                .iter()
                .map(|item| ItemCard::from_item(item, server_host))
                .collect(),
            page: snapshot.page,
            has_more: snapshot.has_more,
            loading_more: snapshot.loading_more,
        }
    }
}

struct OpenList {
    kind: ListKind,
    controller: Arc<RemoteListController>,
}

pub struct ListRegistry {
    next_handle: AtomicU64,
    lists: Mutex<HashMap<u64, OpenList>>,
}

impl Default for ListRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ListRegistry {
    pub fn new() -> Self {
        Self {
            next_handle: AtomicU64::new(1),
            lists: Mutex::new(HashMap::new()),
        }
    }

    pub async fn open(&self, kind: ListKind, controller: Arc<RemoteListController>) -> u64 {
        let handle = self.next_handle.fetch_add(1, Ordering::SeqCst);
        self.lists.lock().await.insert(handle, OpenList { kind, controller });
        log::debug!("opened {} list #{}", kind.as_str(), handle);
        handle
    }

    pub async fn get(&self, handle: u64) -> Result<(ListKind, Arc<RemoteListController>), String> {
        self.lists
            .lock()
            .await
            .get(&handle)
            .map(|open| (open.kind, open.controller.clone()))
            .ok_or_else(|| format!("List #{} is not open", handle))
    }

    /// Forget and detach; returns false for unknown handles
    pub async fn close(&self, handle: u64) -> bool {
        let removed = self.lists.lock().await.remove(&handle);
        match removed {
            Some(open) => {
                open.controller.detach().await;
                log::debug!("closed {} list #{}", open.kind.as_str(), handle);
                true
            }
            None => false,
        }
    }

    /// Detach everything, e.g. after the server address changed
    pub async fn close_all(&self) {
        let drained: Vec<OpenList> = self.lists.lock().await.drain().map(|(_, open)| open).collect();
        for open in drained {
            open.controller.detach().await;
        }
    }

    pub async fn open_count(&self) -> usize {
        self.lists.lock().await.len()
    }
}
