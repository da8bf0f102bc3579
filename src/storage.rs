use crate::error::{QsError, QsResult};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A durable slot keyed by name. Values are opaque text; callers own the encoding.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> QsResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> QsResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> QsResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> QsResult<()> {
        (**self).set(key, value)
    }
}

pub fn default_db_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "example", "QuickSms")?;
    Some(proj.data_dir().join("templates.sqlite"))
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Key-value slot backed by a single SQLite table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> QsResult<Self> {
        ensure_dir(path)?;
        let conn = Connection::open(path)?;
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;
        log::debug!("opened key-value store at {}", path.display());
        Ok(Self { conn })
    }

    pub fn open_default() -> QsResult<Self> {
        let path = default_db_path().ok_or_else(|| QsError::Storage("no data dir".into()))?;
        Self::open(&path)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> QsResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> QsResult<()> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| QsError::Storage(e.to_string()))?
            .as_secs() as i64;
        self.conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value=excluded.value,
                updated_at=excluded.updated_at
            "#,
            params![key, value, now],
        )?;
        Ok(())
    }
}

/// Process-local slot, lost on exit.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> QsResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> QsResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
