//! Remote Layer
//!
//! Clients for the travel server and the registry of open lists.

mod auth;
mod lists;

pub use auth::{AuthClient, AuthError, LoginOutcome, SignupRequest};
pub use lists::{endpoints_for, ItemCard, ListRegistry, ListView};
