//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod list_kind;
mod session;

pub use entity::{DomainError, DomainResult};
pub use list_kind::{ListKind, OFFER_TYPES};
pub use session::{Preferences, Session, UserProfile, CURRENCIES, LANGUAGES, REGIONS};
