//! Repository Integration Tests
//!
//! Key-value and session storage against an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, Preferences, Session, UserProfile};
    use crate::repository::{
        init_db, DbState, KeyValueStore, MemoryKeyValueStore, SessionStore, SqliteKeyValueStore,
    };
    use std::path::PathBuf;

    async fn setup_test_db() -> SqliteKeyValueStore {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        let db_state = init_db(&db_path).await.expect("Failed to init test DB");
        SqliteKeyValueStore::new(db_state.conn.clone())
    }

    fn signed_in_session() -> Session {
        Session {
            user: Some(UserProfile {
                name: "Ayesha".to_string(),
                email: Some("ayesha@example.com".to_string()),
                signed_in_at: Some(1_700_000_000_000),
            }),
            token: Some("jwt-token".to_string()),
            preferences: Preferences {
                language: "French".to_string(),
                region: Some("Asia".to_string()),
                currency: "INR".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let store = setup_test_db().await;

        store.set("user_name", "Ayesha").await.expect("Set failed");
        let value = store.get("user_name").await.expect("Get failed");
        assert_eq!(value.as_deref(), Some("Ayesha"));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = setup_test_db().await;

        store.set("pref_currency", "USD").await.unwrap();
        store.set("pref_currency", "EUR").await.unwrap();
        assert_eq!(store.get("pref_currency").await.unwrap().as_deref(), Some("EUR"));
    }

    #[tokio::test]
    async fn test_remove_missing_key() {
        let store = setup_test_db().await;

        store.remove("never_set").await.expect("Remove should not fail");
        assert!(store.get("never_set").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_uninitialized_db_reports_error() {
        let state = DbState::new(PathBuf::from("unused.db"));
        let store = SqliteKeyValueStore::new(state.conn.clone());

        assert!(matches!(store.get("x").await, Err(DomainError::Internal(_))));
    }

    #[tokio::test]
    async fn test_session_round_trip_sqlite() {
        let sessions = SessionStore::new(setup_test_db().await);

        sessions.save(&signed_in_session()).await.expect("Save failed");
        let loaded = sessions.load().await.expect("Load failed");
        assert_eq!(loaded, signed_in_session());
    }

    #[tokio::test]
    async fn test_empty_store_gives_default_session() {
        let sessions = SessionStore::new(MemoryKeyValueStore::default());

        let loaded = sessions.load().await.unwrap();
        assert!(!loaded.is_signed_in());
        assert!(loaded.token.is_none());
        assert_eq!(loaded.preferences, Preferences::default());
    }

    #[tokio::test]
    async fn test_clear_user_keeps_preferences() {
        let sessions = SessionStore::new(MemoryKeyValueStore::default());
        sessions.save(&signed_in_session()).await.unwrap();

        sessions.clear_user().await.unwrap();

        let loaded = sessions.load().await.unwrap();
        assert!(loaded.user.is_none());
        assert!(loaded.token.is_none());
        assert_eq!(loaded.preferences.currency, "INR");
    }

    #[tokio::test]
    async fn test_invalid_preferences_rejected() {
        let sessions = SessionStore::new(MemoryKeyValueStore::default());
        let prefs = Preferences {
            language: "Klingon".to_string(),
            ..Preferences::default()
        };

        let result = sessions.save_preferences(&prefs).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert_eq!(sessions.load().await.unwrap().preferences.language, "English");
    }

    #[tokio::test]
    async fn test_corrupt_stored_preferences_fall_back() {
        let store = MemoryKeyValueStore::default();
        store.set("pref_language", "Latin").await.unwrap();
        store.set("pref_currency", "EUR").await.unwrap();
        let sessions = SessionStore::new(store);

        assert_eq!(sessions.load().await.unwrap().preferences, Preferences::default());
    }

    #[tokio::test]
    async fn test_signup_only_name() {
        let sessions = SessionStore::new(MemoryKeyValueStore::default());
        let session = Session {
            user: Some(UserProfile {
                name: "Bilal".to_string(),
                email: None,
                signed_in_at: None,
            }),
            ..Session::default()
        };

        sessions.save(&session).await.unwrap();
        assert_eq!(sessions.load().await.unwrap(), session);
    }
}
