//! Session Repository
//!
//! Typed view of the session keys in a `KeyValueStore`.

use log::warn;

use super::traits::KeyValueStore;
use crate::domain::{DomainResult, Preferences, Session, UserProfile};

const USER_NAME: &str = "user_name";
const USER_EMAIL: &str = "user_email";
const USER_SIGNED_IN_AT: &str = "user_signed_in_at";
const AUTH_TOKEN: &str = "auth_token";
const PREF_LANGUAGE: &str = "pref_language";
const PREF_REGION: &str = "pref_region";
const PREF_CURRENCY: &str = "pref_currency";

pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> DomainResult<Session> {
        let user = match self.store.get(USER_NAME).await? {
            Some(name) => Some(UserProfile {
                name,
                email: self.store.get(USER_EMAIL).await?,
                signed_in_at: self
                    .store
                    .get(USER_SIGNED_IN_AT)
                    .await?
                    .and_then(|raw| raw.parse().ok()),
            }),
            None => None,
        };

        let defaults = Preferences::default();
        let stored = Preferences {
            language: self.store.get(PREF_LANGUAGE).await?.unwrap_or(defaults.language.clone()),
            region: self.store.get(PREF_REGION).await?,
            currency: self.store.get(PREF_CURRENCY).await?.unwrap_or(defaults.currency.clone()),
        };
        let preferences = match stored.validate() {
            Ok(()) => stored,
            Err(e) => {
                warn!("Ignoring stored preferences: {}", e);
                defaults
            }
        };

        Ok(Session {
            user,
            token: self.store.get(AUTH_TOKEN).await?,
            preferences,
        })
    }

    pub async fn save(&self, session: &Session) -> DomainResult<()> {
        match &session.user {
            Some(user) => {
                self.store.set(USER_NAME, &user.name).await?;
                self.set_or_remove(USER_EMAIL, user.email.as_deref()).await?;
                let signed_in_at = user.signed_in_at.map(|ts| ts.to_string());
                self.set_or_remove(USER_SIGNED_IN_AT, signed_in_at.as_deref()).await?;
            }
            None => {
                for key in [USER_NAME, USER_EMAIL, USER_SIGNED_IN_AT] {
                    self.store.remove(key).await?;
                }
            }
        }
        self.set_or_remove(AUTH_TOKEN, session.token.as_deref()).await?;
        self.save_preferences(&session.preferences).await
    }

    pub async fn save_preferences(&self, preferences: &Preferences) -> DomainResult<()> {
        preferences.validate()?;
        self.store.set(PREF_LANGUAGE, &preferences.language).await?;
        self.set_or_remove(PREF_REGION, preferences.region.as_deref()).await?;
        self.store.set(PREF_CURRENCY, &preferences.currency).await
    }

    /// Forget the signed-in user; preferences stay
    pub async fn clear_user(&self) -> DomainResult<()> {
        for key in [USER_NAME, USER_EMAIL, USER_SIGNED_IN_AT, AUTH_TOKEN] {
            self.store.remove(key).await?;
        }
        Ok(())
    }

    async fn set_or_remove(&self, key: &str, value: Option<&str>) -> DomainResult<()> {
        match value {
            Some(value) => self.store.set(key, value).await,
            None => self.store.remove(key).await,
        }
    }
}
