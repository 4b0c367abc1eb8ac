//! Remote List
//!
//! Paginated, mutable mirror of a server-hosted collection.
//!
//! - [`RemoteCollection`]: list / create / delete against the server
//! - [`HttpCollection`]: reqwest implementation with configurable routes
//! - [`RemoteListController`]: paging, server-confirmed deletes and stale
//!   response rejection on top of any collection

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod item;

pub use client::RemoteCollection;
pub use controller::{ListSnapshot, LoadOutcome, RemoteListController, DEFAULT_PAGE_SIZE};
pub use error::{ListError, ListResult};
pub use http::{CollectionEndpoints, HttpCollection};
pub use item::{Item, MediaAsset, NewItem};
