//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::DomainResult;

/// String key-value storage for small device-local settings
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Insert or overwrite
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Removing a missing key is not an error
    async fn remove(&self, key: &str) -> DomainResult<()>;
}
