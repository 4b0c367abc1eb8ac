//! Remote List Controller
//!
//! Owns the client-side window over a paged server collection: the items
//! loaded so far, the last committed page and the "more pages might exist"
//! heuristic.
//!
//! Every page request carries a token. A response is applied only while its
//! token is still the latest issued for that page, so a slow page-1 fetch
//! cannot overwrite a newer refresh or bring back an item that was deleted in
//! the meantime. `detach` ties pending work to the lifetime of the owning
//! view: anything that completes afterwards is dropped.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::client::RemoteCollection;
use crate::error::{ListError, ListResult};
use crate::item::{Item, NewItem};

/// Page size used by the gallery screens
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// What happened to the local state after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The response was applied
    Applied,
    /// A newer request, a mutation or `detach` made the response obsolete
    Discarded,
    /// Nothing was requested (no more pages, or a load-more already running)
    Skipped,
}

/// Copy of the controller state handed to the view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSnapshot {
    pub items: Vec<Item>,
    pub page: u32,
    pub has_more: bool,
    pub loading_more: bool,
}

#[derive(Debug, Clone, Copy)]
struct Ticket {
    page: u32,
    token: u64,
    epoch: u64,
}

#[derive(Debug)]
struct ListState {
    items: Vec<Item>,
    /// Highest page applied so far (0 = nothing loaded yet)
    page: u32,
    has_more: bool,
    loading_more: bool,
    next_token: u64,
    /// Latest token issued per page that has not resolved yet
    pending: HashMap<u32, u64>,
    epoch: u64,
    detached: bool,
}

impl ListState {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            has_more: true,
            loading_more: false,
            next_token: 0,
            pending: HashMap::new(),
            epoch: 0,
            detached: false,
        }
    }

    fn issue(&mut self, page: u32) -> Ticket {
        // A fresh page 1 replaces everything, so deeper pages in flight are stale
        if page == 1 {
            self.pending.clear();
        }
        self.next_token += 1;
        self.pending.insert(page, self.next_token);
        Ticket {
            page,
            token: self.next_token,
            epoch: self.epoch,
        }
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        !self.detached
            && self.epoch == ticket.epoch
            && self.pending.get(&ticket.page) == Some(&ticket.token)
    }

    /// `paged` is false when the server returns the whole collection at once
    fn apply_page(&mut self, page: u32, fetched: Vec<Item>, page_size: u32, paged: bool) {
        let count = fetched.len();
        if page == 1 {
            self.items.clear();
        }
        let mut seen: HashSet<String> = self.items.iter().map(|item| item.id.clone()).collect();
        let mut added = 0;
        for item in fetched {
            if seen.insert(item.id.clone()) {
                self.items.push(item);
                added += 1;
            } else {
                debug!("page {} repeats item {}, skipped", page, item.id);
            }
        }
        self.page = page;
        // A later page with nothing new means the server is not paging
        self.has_more = paged && count >= page_size as usize && (page == 1 || added > 0);
    }
}

/// Paged, server-confirmed mirror of one remote collection
pub struct RemoteListController<C: ?Sized = dyn RemoteCollection> {
    client: Arc<C>,
    page_size: u32,
    state: Mutex<ListState>,
}

impl<C: RemoteCollection + ?Sized> RemoteListController<C> {
    pub fn new(client: Arc<C>, page_size: u32) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
            state: Mutex::new(ListState::new()),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        let state = self.state.lock().await;
        ListSnapshot {
            items: state.items.clone(),
            page: state.page,
            has_more: state.has_more,
            loading_more: state.loading_more,
        }
    }

    /// Loaded item by id (open-detail)
    pub async fn find(&self, id: &str) -> Option<Item> {
        let state = self.state.lock().await;
        state.items.iter().find(|item| item.id == id).cloned()
    }

    /// Fetch one page. Page 1 replaces the sequence, later pages append.
    ///
    /// On failure the state is untouched and the error is returned for the
    /// view to show.
    pub async fn load_page(&self, page: u32) -> ListResult<LoadOutcome> {
        let page = page.max(1);
        let ticket = {
            let mut state = self.state.lock().await;
            if state.detached {
                return Ok(LoadOutcome::Discarded);
            }
            state.issue(page)
        };

        let result = self.client.list_page(page, self.page_size).await;

        let mut state = self.state.lock().await;
        if !state.is_current(&ticket) {
            debug!("dropping stale response for page {} (token {})", page, ticket.token);
            return Ok(LoadOutcome::Discarded);
        }
        state.pending.remove(&page);

        match result {
            Ok(items) => {
                debug!("page {} returned {} items", page, items.len());
                state.apply_page(page, items, self.page_size, self.client.is_paged());
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                warn!("loading page {} failed: {}", page, err);
                Err(err)
            }
        }
    }

    pub async fn refresh(&self) -> ListResult<LoadOutcome> {
        self.load_page(1).await
    }

    /// Load the page after the last applied one.
    ///
    /// Repeated calls while one is still running are skipped rather than
    /// queued.
    pub async fn load_more(&self) -> ListResult<LoadOutcome> {
        let next = {
            let mut state = self.state.lock().await;
            if state.detached {
                return Ok(LoadOutcome::Discarded);
            }
            if !state.has_more || state.loading_more {
                return Ok(LoadOutcome::Skipped);
            }
            state.loading_more = true;
            state.page + 1
        };

        let result = self.load_page(next).await;
        self.state.lock().await.loading_more = false;
        result
    }

    /// Delete on the server, then drop the item locally.
    ///
    /// Nothing changes locally until the server has confirmed.
    pub async fn remove(&self, id: &str) -> ListResult<LoadOutcome> {
        let epoch = {
            let state = self.state.lock().await;
            if state.detached {
                return Ok(LoadOutcome::Discarded);
            }
            state.epoch
        };

        let deleted = match self.client.delete(id).await {
            Ok(deleted) => deleted,
            Err(err) => {
                warn!("deleting {} failed: {}", id, err);
                return Err(err);
            }
        };
        if !deleted {
            return Err(ListError::Validation(format!("The server refused to delete item {}", id)));
        }

        let mut state = self.state.lock().await;
        if state.detached || state.epoch != epoch {
            return Ok(LoadOutcome::Discarded);
        }
        state.items.retain(|item| item.id != id);
        // Pages requested before the delete may still contain the item
        state.pending.clear();
        info!("removed item {}", id);
        Ok(LoadOutcome::Applied)
    }

    /// Upload a new item and reload from page 1.
    ///
    /// A failing reload is logged; the upload itself still counts as done.
    pub async fn create(&self, item: NewItem) -> ListResult<Item> {
        let created = self.client.create(item).await?;
        info!("created item {}", created.id);
        if let Err(err) = self.refresh().await {
            warn!("reload after creating {} failed: {}", created.id, err);
        }
        Ok(created)
    }

    /// Stop applying results; called when the owning view goes away
    pub async fn detach(&self) {
        let mut state = self.state.lock().await;
        state.detached = true;
        state.epoch += 1;
        state.pending.clear();
    }

    pub async fn is_detached(&self) -> bool {
        self.state.lock().await.detached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::MediaAsset;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    /// In-memory collection with failure injection and a one-shot gate that
    /// holds a list response until the test releases it
    #[derive(Default)]
    struct FakeCollection {
        server: StdMutex<Vec<Item>>,
        fail_next_list: StdMutex<Option<ListError>>,
        fail_next_delete: StdMutex<Option<ListError>>,
        refuse_delete: AtomicBool,
        gate_next_list: AtomicBool,
        /// Every request returns the whole collection
        ignores_paging: AtomicBool,
        /// Advertises itself as unpaged
        single_page: AtomicBool,
        entered: Notify,
        release: Notify,
        list_calls: AtomicUsize,
    }

    impl FakeCollection {
        fn with_ids(ids: &[&str]) -> Arc<Self> {
            let fake = Self::default();
            *fake.server.lock().unwrap() = items(ids);
            Arc::new(fake)
        }

        fn replace(&self, ids: &[&str]) {
            *self.server.lock().unwrap() = items(ids);
        }

        fn calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RemoteCollection for FakeCollection {
        async fn list_page(&self, page: u32, page_size: u32) -> ListResult<Vec<Item>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            let injected = self.fail_next_list.lock().unwrap().take();
            if let Some(err) = injected {
                return Err(err);
            }
            let page_items: Vec<Item> = {
                let server = self.server.lock().unwrap();
                if self.ignores_paging.load(Ordering::SeqCst) || self.single_page.load(Ordering::SeqCst) {
                    server.clone()
                } else {
                    let start = ((page - 1) * page_size) as usize;
                    server.iter().skip(start).take(page_size as usize).cloned().collect()
                }
            };
            if self.gate_next_list.swap(false, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            Ok(page_items)
        }

        async fn create(&self, item: NewItem) -> ListResult<Item> {
            let mut created = Item::new(format!("new-{}", item.asset.file_name), "http://localhost/x.jpg");
            for (key, value) in item.fields {
                created = created.with_attribute(key, value);
            }
            self.server.lock().unwrap().insert(0, created.clone());
            Ok(created)
        }

        async fn delete(&self, id: &str) -> ListResult<bool> {
            let injected = self.fail_next_delete.lock().unwrap().take();
            if let Some(err) = injected {
                return Err(err);
            }
            if self.refuse_delete.load(Ordering::SeqCst) {
                return Ok(false);
            }
            let mut server = self.server.lock().unwrap();
            let before = server.len();
            server.retain(|item| item.id != id);
            Ok(server.len() != before)
        }

        fn is_paged(&self) -> bool {
            !self.single_page.load(Ordering::SeqCst)
        }
    }

    fn items(ids: &[&str]) -> Vec<Item> {
        ids.iter().map(|id| Item::new(*id, format!("http://localhost/{}.jpg", id))).collect()
    }

    fn numbered(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("item-{:02}", i)).collect()
    }

    fn ids(snapshot: &ListSnapshot) -> Vec<&str> {
        snapshot.items.iter().map(|item| item.id.as_str()).collect()
    }

    fn controller(fake: &Arc<FakeCollection>, page_size: u32) -> Arc<RemoteListController<FakeCollection>> {
        Arc::new(RemoteListController::new(fake.clone(), page_size))
    }

    #[tokio::test]
    async fn refresh_replaces_instead_of_accumulating() {
        let fake = FakeCollection::with_ids(&["a", "b", "c"]);
        let list = controller(&fake, 10);

        assert_eq!(list.refresh().await, Ok(LoadOutcome::Applied));
        fake.replace(&["x", "y"]);
        assert_eq!(list.refresh().await, Ok(LoadOutcome::Applied));

        let snapshot = list.snapshot().await;
        assert_eq!(ids(&snapshot), vec!["x", "y"]);
        assert_eq!(snapshot.page, 1);
    }

    #[tokio::test]
    async fn paging_through_fourteen_items() {
        let names = numbered(14);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let fake = FakeCollection::with_ids(&refs);
        let list = controller(&fake, 10);

        list.refresh().await.unwrap();
        let first = list.snapshot().await;
        assert_eq!(first.items.len(), 10);
        assert!(first.has_more);

        assert_eq!(list.load_more().await, Ok(LoadOutcome::Applied));
        let second = list.snapshot().await;
        assert_eq!(second.items.len(), 14);
        assert!(!second.has_more);
        assert_eq!(second.page, 2);
        assert_eq!(ids(&second), refs);
    }

    #[tokio::test]
    async fn load_more_without_more_pages_does_not_fetch() {
        let fake = FakeCollection::with_ids(&["a", "b"]);
        let list = controller(&fake, 10);

        list.refresh().await.unwrap();
        assert!(!list.snapshot().await.has_more);
        let calls = fake.calls();

        assert_eq!(list.load_more().await, Ok(LoadOutcome::Skipped));
        assert_eq!(fake.calls(), calls);
    }

    #[tokio::test]
    async fn first_load_more_loads_page_one() {
        let fake = FakeCollection::with_ids(&["a"]);
        let list = controller(&fake, 10);

        assert_eq!(list.load_more().await, Ok(LoadOutcome::Applied));
        assert_eq!(ids(&list.snapshot().await), vec!["a"]);
    }

    #[tokio::test]
    async fn exact_page_size_keeps_has_more() {
        let fake = FakeCollection::with_ids(&["a", "b"]);
        let list = controller(&fake, 2);

        list.refresh().await.unwrap();
        assert!(list.snapshot().await.has_more);

        // Next page is empty, which ends paging
        list.load_more().await.unwrap();
        let snapshot = list.snapshot().await;
        assert!(!snapshot.has_more);
        assert_eq!(snapshot.items.len(), 2);
    }

    #[tokio::test]
    async fn remove_drops_only_the_deleted_item() {
        let fake = FakeCollection::with_ids(&["A", "B", "C"]);
        let list = controller(&fake, 10);
        list.refresh().await.unwrap();

        assert_eq!(list.remove("B").await, Ok(LoadOutcome::Applied));
        assert_eq!(ids(&list.snapshot().await), vec!["A", "C"]);
    }

    #[tokio::test]
    async fn failed_remove_leaves_sequence_alone() {
        let fake = FakeCollection::with_ids(&["A", "B", "C"]);
        let list = controller(&fake, 10);
        list.refresh().await.unwrap();
        let before = list.snapshot().await;

        *fake.fail_next_delete.lock().unwrap() = Some(ListError::Network("offline".into()));
        assert_eq!(list.remove("B").await, Err(ListError::Network("offline".into())));
        assert_eq!(list.snapshot().await, before);

        fake.refuse_delete.store(true, Ordering::SeqCst);
        assert!(matches!(list.remove("B").await, Err(ListError::Validation(_))));
        assert_eq!(list.snapshot().await, before);
    }

    #[tokio::test]
    async fn protocol_error_keeps_items_and_has_more() {
        let names = numbered(10);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let fake = FakeCollection::with_ids(&refs);
        let list = controller(&fake, 10);
        list.refresh().await.unwrap();
        let before = list.snapshot().await;

        *fake.fail_next_list.lock().unwrap() = Some(ListError::Protocol("expected a JSON array".into()));
        assert!(matches!(list.load_more().await, Err(ListError::Protocol(_))));

        let after = list.snapshot().await;
        assert_eq!(after, before);
        assert!(after.has_more);
        assert!(!after.loading_more);
    }

    #[tokio::test]
    async fn failed_load_more_retries_the_same_page() {
        let names = numbered(12);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let fake = FakeCollection::with_ids(&refs);
        let list = controller(&fake, 10);
        list.refresh().await.unwrap();

        *fake.fail_next_list.lock().unwrap() = Some(ListError::Network("timeout".into()));
        assert!(list.load_more().await.is_err());
        assert_eq!(list.snapshot().await.page, 1);

        assert_eq!(list.load_more().await, Ok(LoadOutcome::Applied));
        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.page, 2);
        assert_eq!(snapshot.items.len(), 12);
    }

    #[tokio::test]
    async fn repeated_load_more_taps_are_deduplicated() {
        let names = numbered(15);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let fake = FakeCollection::with_ids(&refs);
        let list = controller(&fake, 10);
        list.refresh().await.unwrap();

        fake.gate_next_list.store(true, Ordering::SeqCst);
        let first = {
            let list = list.clone();
            tokio::spawn(async move { list.load_more().await })
        };
        fake.entered.notified().await;

        assert!(list.snapshot().await.loading_more);
        assert_eq!(list.load_more().await, Ok(LoadOutcome::Skipped));

        fake.release.notify_one();
        assert_eq!(first.await.unwrap(), Ok(LoadOutcome::Applied));
        assert_eq!(list.snapshot().await.items.len(), 15);
        assert_eq!(fake.calls(), 2);
    }

    #[tokio::test]
    async fn stale_refresh_cannot_resurrect_deleted_item() {
        let fake = FakeCollection::with_ids(&["A", "B", "C"]);
        let list = controller(&fake, 10);
        list.refresh().await.unwrap();

        // This refresh captures [A, B, C] and is held back
        fake.gate_next_list.store(true, Ordering::SeqCst);
        let stale = {
            let list = list.clone();
            tokio::spawn(async move { list.refresh().await })
        };
        fake.entered.notified().await;

        assert_eq!(list.remove("B").await, Ok(LoadOutcome::Applied));

        fake.release.notify_one();
        assert_eq!(stale.await.unwrap(), Ok(LoadOutcome::Discarded));
        assert_eq!(ids(&list.snapshot().await), vec!["A", "C"]);
    }

    #[tokio::test]
    async fn newer_refresh_wins_over_older_one() {
        let fake = FakeCollection::with_ids(&["old"]);
        let list = controller(&fake, 10);

        fake.gate_next_list.store(true, Ordering::SeqCst);
        let older = {
            let list = list.clone();
            tokio::spawn(async move { list.refresh().await })
        };
        fake.entered.notified().await;

        fake.replace(&["new"]);
        assert_eq!(list.refresh().await, Ok(LoadOutcome::Applied));

        fake.release.notify_one();
        assert_eq!(older.await.unwrap(), Ok(LoadOutcome::Discarded));
        assert_eq!(ids(&list.snapshot().await), vec!["new"]);
    }

    #[tokio::test]
    async fn detached_controller_ignores_late_results() {
        let fake = FakeCollection::with_ids(&["a"]);
        let list = controller(&fake, 10);

        fake.gate_next_list.store(true, Ordering::SeqCst);
        let pending = {
            let list = list.clone();
            tokio::spawn(async move { list.refresh().await })
        };
        fake.entered.notified().await;

        list.detach().await;
        fake.release.notify_one();

        assert_eq!(pending.await.unwrap(), Ok(LoadOutcome::Discarded));
        assert!(list.snapshot().await.items.is_empty());
        assert_eq!(list.load_more().await, Ok(LoadOutcome::Discarded));
        assert!(list.is_detached().await);
    }

    #[tokio::test]
    async fn create_reloads_from_first_page() {
        let fake = FakeCollection::with_ids(&["a", "b"]);
        let list = controller(&fake, 10);
        list.refresh().await.unwrap();

        let payload = NewItem::new(MediaAsset::new("lake.jpg", "image/jpeg", vec![1]))
            .with_field("name", "Lake");
        let created = list.create(payload).await.unwrap();

        assert_eq!(created.attribute("name"), Some("Lake"));
        assert_eq!(ids(&list.snapshot().await), vec!["new-lake.jpg", "a", "b"]);
    }

    #[tokio::test]
    async fn shifted_pages_do_not_duplicate_items() {
        let fake = FakeCollection::with_ids(&["a", "b", "c", "d"]);
        let list = controller(&fake, 2);
        list.refresh().await.unwrap();

        // Someone else inserted at the front, shifting "b" onto page 2
        fake.replace(&["z", "a", "b", "c"]);
        list.load_more().await.unwrap();

        assert_eq!(ids(&list.snapshot().await), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn server_ignoring_page_query_ends_paging() {
        let names = numbered(12);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let fake = FakeCollection::with_ids(&refs);
        fake.ignores_paging.store(true, Ordering::SeqCst);
        let list = controller(&fake, 10);

        list.refresh().await.unwrap();
        assert!(list.snapshot().await.has_more);

        // Page 2 repeats page 1, so nothing is added and paging stops
        assert_eq!(list.load_more().await, Ok(LoadOutcome::Applied));
        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.items.len(), 12);
        assert!(!snapshot.has_more);

        let calls = fake.calls();
        for _ in 0..3 {
            assert_eq!(list.load_more().await, Ok(LoadOutcome::Skipped));
        }
        assert_eq!(fake.calls(), calls);
    }

    #[tokio::test]
    async fn unpaged_collection_loads_once() {
        let names = numbered(12);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let fake = FakeCollection::with_ids(&refs);
        fake.single_page.store(true, Ordering::SeqCst);
        let list = controller(&fake, 10);

        list.refresh().await.unwrap();
        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.items.len(), 12);
        assert!(!snapshot.has_more);
        assert_eq!(list.load_more().await, Ok(LoadOutcome::Skipped));
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn works_behind_a_trait_object() {
        let fake = FakeCollection::with_ids(&["a"]);
        let client: Arc<dyn RemoteCollection> = fake;
        let list: RemoteListController = RemoteListController::new(client, DEFAULT_PAGE_SIZE);

        list.refresh().await.unwrap();
        assert_eq!(list.find("a").await.map(|item| item.id), Some("a".to_string()));
        assert!(list.find("missing").await.is_none());
    }
}
