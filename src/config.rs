//! Runtime configuration.
//!
//! Values come from CLI flags, each of which falls back to an environment
//! variable (`ADDRNOTES_BIND`, `ADDRNOTES_DB`, `ADDRNOTES_MEMORY`,
//! `ADDRNOTES_LOG`) and then to a default.

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::storage::{Datastore, MemoryDatastore, SqliteDatastore};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_SERVE_LOG: &str = "info";

/// Which datastore backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Process-local map; nothing survives a restart.
    Memory,
    /// SQLite file at an explicit path.
    Sqlite(PathBuf),
    /// The project database under `<root>/.addrnotes/`, which must already exist.
    Project(PathBuf),
}

impl StoreConfig {
    /// Pick a backend from the `--memory` and `--db` flags.
    pub fn resolve(memory: bool, db: Option<PathBuf>) -> Self {
        if memory {
            return StoreConfig::Memory;
        }
        match db {
            Some(path) => StoreConfig::Sqlite(path),
            None => StoreConfig::Project(find_project_root()),
        }
    }

    /// Create the datastore handle. Called once at startup.
    pub fn open(&self) -> Result<Arc<dyn Datastore>> {
        let store: Arc<dyn Datastore> = match self {
            StoreConfig::Memory => Arc::new(MemoryDatastore::new()),
            StoreConfig::Sqlite(path) => Arc::new(SqliteDatastore::open_path(path)?),
            StoreConfig::Project(root) => Arc::new(SqliteDatastore::open(root)?),
        };
        Ok(store)
    }

    pub fn describe(&self) -> String {
        match self {
            StoreConfig::Memory => "in-memory".to_string(),
            StoreConfig::Sqlite(path) => format!("sqlite:{}", path.display()),
            StoreConfig::Project(root) => format!("project:{}", root.display()),
        }
    }
}

/// Settings for `addrnotes serve`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub store: StoreConfig,
    pub log_filter: String,
}

impl ServerConfig {
    pub fn new(bind: SocketAddr, store: StoreConfig, log_filter: Option<String>) -> Self {
        Self {
            bind,
            store,
            log_filter: log_filter.unwrap_or_else(|| DEFAULT_SERVE_LOG.to_string()),
        }
    }
}

/// Find the project root by looking for .addrnotes/ or .git/
pub fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_root_from(&cwd)
}

fn find_root_from(start: &Path) -> PathBuf {
    let mut current = start;
    loop {
        if current.join(crate::storage::DATA_DIR).exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return start.to_path_buf(),
        }
    }
}
