//! Frontend Models
//!
//! Data structures matching backend DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const LANGUAGES: [&str; 4] = ["English", "Spanish", "French", "German"];
pub const REGIONS: [&str; 4] = ["North America", "Europe", "Asia", "Africa"];
pub const CURRENCIES: [&str; 4] = ["USD", "EUR", "GBP", "INR"];
pub const OFFER_TYPES: [&str; 6] = [
    "Train Offers",
    "Bus Offers",
    "Car Offers",
    "Bike Offers",
    "Flight Offers",
    "Stay Offers",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Gallery,
    Offers,
}

/// One remote item, media URL already reachable from this device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCard {
    pub id: String,
    pub media_url: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ItemCard {
    /// Attribute text, empty when missing
    pub fn attr(&self, key: &str) -> String {
        self.attributes.get(key).cloned().unwrap_or_default()
    }
}

/// State of an open list (matches backend `ListView`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub handle: u64,
    pub kind: ListKind,
    pub items: Vec<ItemCard>,
    pub page: u32,
    pub has_more: bool,
    pub loading_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: Option<String>,
    pub signed_in_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub language: String,
    pub region: Option<String>,
    pub currency: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: LANGUAGES[0].to_string(),
            region: None,
            currency: CURRENCIES[0].to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server_url: String,
    pub page_size: u32,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}
