use std::fs;
use std::path::Path;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use super::{Datastore, StorageKey};
use crate::entity::NoteRecord;
use crate::error::{NotesError, Result};

pub const DATA_DIR: &str = ".addrnotes";
pub const NOTES_DB: &str = "notes.db";

/// SQLite-backed datastore. Each record is one row of JSON in `entities`.
pub struct SqliteDatastore {
    conn: Mutex<Connection>,
}

impl SqliteDatastore {
    /// Initialize a new project data directory under `root`
    pub fn init(root: &Path) -> Result<Self> {
        let data_dir = root.join(DATA_DIR);

        if data_dir.exists() {
            return Err(NotesError::AlreadyInitialized);
        }

        fs::create_dir_all(&data_dir)?;
        Self::open_path(&data_dir.join(NOTES_DB))
    }

    /// Open the database of an existing project
    pub fn open(root: &Path) -> Result<Self> {
        let path = root.join(DATA_DIR).join(NOTES_DB);

        if !path.exists() {
            return Err(NotesError::NotInitialized);
        }

        Self::open_path(&path)
    }

    /// Open or create a database file at an explicit path
    pub fn open_path(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        tracing::debug!("Opened SQLite datastore at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// A private database that lives only as long as this handle
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Initialize the database schema
    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS entities (
                kind TEXT NOT NULL,
                name TEXT NOT NULL,
                data TEXT NOT NULL,
                PRIMARY KEY (kind, name)
            )",
            [],
        )?;
        Ok(())
    }
}

/// JSON path selecting a top-level field, quoted so any field name is literal.
fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', ""))
}

#[async_trait]
impl Datastore for SqliteDatastore {
    async fn get(&self, key: &StorageKey) -> Result<Option<NoteRecord>> {
        let conn = self.conn.lock().await;
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM entities WHERE kind = ?1 AND name = ?2",
                params![key.kind, key.name],
                |row| row.get(0),
            )
            .optional()?;

        match data {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, key: &StorageKey, record: &NoteRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO entities (kind, name, data) VALUES (?1, ?2, ?3)",
            params![key.kind, key.name, json],
        )?;
        Ok(())
    }

    async fn delete(&self, key: &StorageKey) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "DELETE FROM entities WHERE kind = ?1 AND name = ?2",
            params![key.kind, key.name],
        )?;
        Ok(())
    }

    async fn query(&self, kind: &str, order_by: &str) -> Result<Vec<(StorageKey, NoteRecord)>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT name, data FROM entities
             WHERE kind = ?1
             ORDER BY json_extract(data, ?2) ASC NULLS FIRST, name ASC",
        )?;

        let rows = stmt
            .query_map(params![kind, json_path(order_by)], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut results = Vec::with_capacity(rows.len());
        for (name, json) in rows {
            let record: NoteRecord = serde_json::from_str(&json)?;
            results.push((StorageKey::new(kind, name), record));
        }
        Ok(results)
    }
}
