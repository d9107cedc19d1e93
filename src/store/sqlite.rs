use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::record::{Preference, PreferenceRecord, level_in_range};
use super::PreferenceStore;
use crate::error::StorageError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed store. Holds only the file path; every operation opens its
/// own connection and drops it before returning.
#[derive(Debug, Clone)]
pub struct SqlitePreferenceStore {
    path: PathBuf,
}

impl SqlitePreferenceStore {
    /// Opens the store at `path`, creating the file and schema if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self { path: path.into() };
        store.initialize()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Idempotent schema setup.
    pub fn initialize(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = self.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (name TEXT, topic TEXT, level INTEGER)",
            [],
        )?;
        debug!(path = %self.path.display(), "preference store ready");
        Ok(())
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        let conn = Connection::open(&self.path).map_err(|source| StorageError::Open {
            path: self.path.clone(),
            source,
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    fn save(&self, name: &str, topic: &str, level: u8) -> Result<(), StorageError> {
        if level_in_range(i64::from(level)).is_none() {
            return Err(StorageError::InvalidLevel(level.to_string()));
        }
        let mut conn = self.connect()?;
        // Take the write lock up front so concurrent appenders queue on busy_timeout.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO users (name, topic, level) VALUES (?1, ?2, ?3)",
            params![name, topic, level],
        )?;
        tx.commit()?;
        info!(name, topic, level, "saved preference");
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<Option<Preference>, StorageError> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                "SELECT topic, level FROM users WHERE name = ?1 ORDER BY rowid DESC LIMIT 1",
                params![name],
                |row| Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Value>(1)?)),
            )
            .optional()?;

        let Some((topic, level)) = row else {
            debug!(name, "no stored preference");
            return Ok(None);
        };
        Ok(Some(Preference {
            topic: topic.unwrap_or_default(),
            level: level_from_value(level)?,
        }))
    }

    fn list_all(&self) -> Result<Vec<PreferenceRecord>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT name, topic, level FROM users ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Value>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (name, topic, level) = row?;
            let name = name.unwrap_or_default();
            let level = match level_from_value(level) {
                Ok(level) => level,
                Err(err) => {
                    warn!(name = %name, error = %err, "skipping unreadable preference row");
                    continue;
                }
            };
            records.push(PreferenceRecord {
                name,
                topic: topic.unwrap_or_default(),
                level,
            });
        }
        Ok(records)
    }
}

/// Databases written by earlier versions declared `level TEXT`, so the column
/// may hold either storage class.
fn level_from_value(value: Value) -> Result<u8, StorageError> {
    let parsed = match &value {
        Value::Integer(level) => level_in_range(*level),
        Value::Text(text) => text.trim().parse::<i64>().ok().and_then(level_in_range),
        Value::Real(level) if level.fract() == 0.0 => level_in_range(*level as i64),
        _ => None,
    };
    parsed.ok_or_else(|| StorageError::InvalidLevel(describe_value(&value)))
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(level) => level.to_string(),
        Value::Real(level) => level.to_string(),
        Value::Text(text) => text.clone(),
        Value::Blob(bytes) => format!("<{} byte blob>", bytes.len()),
    }
}
