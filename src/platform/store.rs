//! # Durable Settings Store
//!
//! SQLite-backed key-value store. One `settings` table, one row per
//! key, last write wins. The connection is serialized behind an async
//! mutex since every caller is a single settings screen anyway.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use crate::platform::SettingsStore;
use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use sqlite::{Connection, State};
use std::path::Path;
use tokio::sync::Mutex;

/// Key-value store persisted in a SQLite database file
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = sqlite::open(path.as_ref())?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )?;
        debug!("Opened settings store at {}", path.as_ref().display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl SettingsStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?")?;
        stmt.bind((1, key))?;
        if stmt.next()? == State::Row {
            Ok(Some(stmt.read::<String, _>(0)?))
        } else {
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "INSERT INTO settings (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )?;
        stmt.bind((1, key))?;
        stmt.bind((2, value))?;
        while stmt.next()? != State::Done {}
        Ok(())
    }
}
