//! Remote collections the app can browse

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};

/// Offer categories selectable when adding an offer
pub const OFFER_TYPES: [&str; 6] = [
    "Train Offers",
    "Bus Offers",
    "Car Offers",
    "Bike Offers",
    "Flight Offers",
    "Stay Offers",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Travel photo gallery
    Gallery,
    /// Offers board, grouped by offer type
    Offers,
}

impl ListKind {
    /// Text fields an upload must carry
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            ListKind::Gallery => &["name", "description", "location"],
            ListKind::Offers => &["offerType", "description"],
        }
    }

    /// Checks beyond presence that depend on the collection
    pub fn check_fields(&self, fields: &[(String, String)]) -> DomainResult<()> {
        if *self == ListKind::Offers {
            let offer_type = fields
                .iter()
                .find(|(name, _)| name == "offerType")
                .map(|(_, value)| value.as_str())
                .unwrap_or_default();
            if !offer_type.is_empty() && !OFFER_TYPES.contains(&offer_type) {
                return Err(DomainError::InvalidInput(format!("Unknown offer type: {}", offer_type)));
            }
        }
        Ok(())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Gallery => "gallery",
            ListKind::Offers => "offers",
        }
    }
}
