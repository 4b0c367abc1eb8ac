//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod kv_repo;
mod session_repo;

#[cfg(test)]
mod tests;

pub use traits::KeyValueStore;
pub use db::{init_db, DbState, SharedConnection};
pub use kv_repo::SqliteKeyValueStore;
#[cfg(test)]
pub use kv_repo::MemoryKeyValueStore;
pub use session_repo::SessionStore;
