//! Session domain entities
//!
//! Signed-in user, auth token and display preferences kept on the device.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};

pub const LANGUAGES: [&str; 4] = ["English", "Spanish", "French", "German"];
pub const REGIONS: [&str; 4] = ["North America", "Europe", "Asia", "Africa"];
pub const CURRENCIES: [&str; 4] = ["USD", "EUR", "GBP", "INR"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: Option<String>,
    /// Unix millis of the last successful login
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

impl Preferences {
    /// Reject values that are not offered in the settings screen
    pub fn validate(&self) -> DomainResult<()> {
        if !LANGUAGES.contains(&self.language.as_str()) {
            return Err(DomainError::InvalidInput(format!("Unsupported language: {}", self.language)));
        }
        if let Some(region) = &self.region {
            if !REGIONS.contains(&region.as_str()) {
                return Err(DomainError::InvalidInput(format!("Unsupported region: {}", region)));
            }
        }
        if !CURRENCIES.contains(&self.currency.as_str()) {
            return Err(DomainError::InvalidInput(format!("Unsupported currency: {}", self.currency)));
        }
        Ok(())
    }
}

/// Everything persisted between launches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<UserProfile>,
    /// Never sent to the frontend
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub preferences: Preferences,
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let prefs = Preferences::default();
        assert_eq!(prefs.language, "English");
        assert_eq!(prefs.currency, "USD");
        assert!(prefs.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_values() {
        let prefs = Preferences {
            region: Some("Antarctica".into()),
            ..Preferences::default()
        };
        assert!(matches!(prefs.validate(), Err(DomainError::InvalidInput(_))));

        let prefs = Preferences {
            currency: "JPY".into(),
            ..Preferences::default()
        };
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn token_is_not_serialized() {
        let session = Session {
            token: Some("secret".into()),
            ..Session::default()
        };
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("secret"));
    }
}
