//! Key-value datastore seam.
//!
//! Records are addressed by a [`StorageKey`] (entity kind plus name). Two
//! backends implement [`Datastore`]: an in-process map and a SQLite file.

mod memory;
mod sqlite_store;

pub use memory::MemoryDatastore;
pub use sqlite_store::{SqliteDatastore, DATA_DIR, NOTES_DB};

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::entity::NoteRecord;
use crate::error::Result;

/// Entity kind under which notes are stored.
pub const NOTE_KIND: &str = "Note";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StorageKey {
    pub kind: String,
    pub name: String,
}

impl StorageKey {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Key for the note stored under `addr`.
    pub fn note(addr: &str) -> Self {
        Self::new(NOTE_KIND, addr)
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Storage collaborator consumed by the note service.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Fetch the record stored under `key`, if any.
    async fn get(&self, key: &StorageKey) -> Result<Option<NoteRecord>>;

    /// Insert or replace the record stored under `key`.
    async fn save(&self, key: &StorageKey, record: &NoteRecord) -> Result<()>;

    /// Remove the record under `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &StorageKey) -> Result<()>;

    /// All records of `kind`, ascending by the field `order_by`.
    ///
    /// Records missing the field come first, integers sort before strings,
    /// and ties are broken by key name.
    async fn query(&self, kind: &str, order_by: &str) -> Result<Vec<(StorageKey, NoteRecord)>>;
}

/// Ordering shared by every backend's `query`.
pub(crate) fn compare_by_field(
    field: &str,
    a: &(StorageKey, NoteRecord),
    b: &(StorageKey, NoteRecord),
) -> Ordering {
    a.1.get(field)
        .cmp(&b.1.get(field))
        .then_with(|| a.0.name.cmp(&b.0.name))
}
