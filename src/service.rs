//! The four note operations, independent of transport.
//!
//! Every operation runs Validate → Locate → Mutate/Read → Respond. A failure
//! at any stage is logged and returned; nothing is retried.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::{fields, NoteParams, NoteRecord, NoteView};
use crate::error::{NotesError, Result};
use crate::storage::{Datastore, StorageKey, NOTE_KIND};
use crate::validate::{extract_address, Fields};

/// What a mutating call did to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Created,
    Updated,
    Deleted,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Created => write!(f, "created"),
            Action::Updated => write!(f, "updated"),
            Action::Deleted => write!(f, "deleted"),
        }
    }
}

/// Response body of create-or-update and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub addr: String,
    pub action: Action,
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn Datastore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self { store }
    }

    /// Create the note for `addr`, or merge the provided fields into it.
    pub async fn create_or_update(&self, body: &Fields) -> Result<ActionResponse> {
        let result = self.try_create_or_update(body).await;
        log_failure("create_or_update", &result);
        result
    }

    /// Fetch the note for `addr`, with `addr` attached.
    pub async fn read(&self, body: &Fields) -> Result<NoteView> {
        let result = self.try_read(body).await;
        log_failure("read", &result);
        result
    }

    /// Remove the note for `addr`. Succeeds whether or not it existed.
    pub async fn delete(&self, body: &Fields) -> Result<ActionResponse> {
        let result = self.try_delete(body).await;
        log_failure("delete", &result);
        result
    }

    /// Every note, ascending by `value`; notes without a value come first.
    pub async fn list(&self) -> Result<Vec<NoteView>> {
        let result = self.try_list().await;
        log_failure("list", &result);
        result
    }

    async fn try_create_or_update(&self, body: &Fields) -> Result<ActionResponse> {
        let params = NoteParams::from_fields(body)?;
        let key = StorageKey::note(&params.addr);

        let (mut record, action) = match self.store.get(&key).await? {
            Some(existing) => (existing, Action::Updated),
            None => (NoteRecord::new(), Action::Created),
        };

        record.merge_defined(&params);
        self.store.save(&key, &record).await?;

        tracing::info!("Note {} {}", params.addr, action);
        Ok(ActionResponse {
            addr: params.addr,
            action,
        })
    }

    async fn try_read(&self, body: &Fields) -> Result<NoteView> {
        let addr = extract_address(body)?;
        let key = StorageKey::note(&addr);

        let record = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| NotesError::NotFound(addr.clone()))?;

        tracing::debug!("Read note {}", addr);
        Ok(record.into_view(addr))
    }

    async fn try_delete(&self, body: &Fields) -> Result<ActionResponse> {
        let addr = extract_address(body)?;
        let key = StorageKey::note(&addr);

        self.store.delete(&key).await?;

        tracing::info!("Note {} deleted", addr);
        Ok(ActionResponse {
            addr,
            action: Action::Deleted,
        })
    }

    async fn try_list(&self) -> Result<Vec<NoteView>> {
        let entries = self.store.query(NOTE_KIND, fields::VALUE).await?;

        tracing::debug!("Listed {} notes", entries.len());
        Ok(entries
            .into_iter()
            .map(|(key, record)| record.into_view(key.name))
            .collect())
    }
}

fn log_failure<T>(operation: &str, result: &Result<T>) {
    if let Err(e) = result {
        tracing::error!(operation, kind = e.kind(), "{}", e);
    }
}
