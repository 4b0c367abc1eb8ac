//! Key-Value Repository
//!
//! SQLite-backed `KeyValueStore` over the `kv_store` table.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::db::SharedConnection;
use super::traits::KeyValueStore;
use crate::domain::{DomainError, DomainResult};

pub struct SqliteKeyValueStore {
    conn: SharedConnection,
}

impl SqliteKeyValueStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

fn not_initialized() -> DomainError {
    DomainError::Internal("Database not initialized".to_string())
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let now = chrono::Local::now().timestamp_millis();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.execute("DELETE FROM kv_store WHERE key = ?", params![key])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}

/// HashMap-backed store for tests
#[cfg(test)]
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: tokio::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.entries.lock().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
