//! Remote Resource Client - Core Trait
//!
//! The controller only talks to the server through this trait, so it can be
//! driven by HTTP in the app and by scripted fakes in tests.

use async_trait::async_trait;

use crate::error::ListResult;
use crate::item::{Item, NewItem};

/// A server-side collection that can be paged through, appended to and
/// deleted from
#[async_trait]
pub trait RemoteCollection: Send + Sync {
    /// Fetch one page (1-based) of at most `page_size` items
    async fn list_page(&self, page: u32, page_size: u32) -> ListResult<Vec<Item>>;

    /// Upload a new item; returns the record the server created
    async fn create(&self, item: NewItem) -> ListResult<Item>;

    /// Delete by id. `Ok(false)` means the server answered but refused.
    async fn delete(&self, id: &str) -> ListResult<bool>;

    /// False for collections the server returns whole on every request
    fn is_paged(&self) -> bool {
        true
    }
}
