// src/entity/note.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::FieldValue;

/// Field names as they appear in request bodies and stored records.
pub mod fields {
    pub const ADDR: &str = "addr";
    pub const COST: &str = "cost";
    pub const COST_UNIT: &str = "costUnit";
    pub const VALUE: &str = "value";
    pub const VALUE_UNIT: &str = "valueUnit";
    pub const STATUS: &str = "status";
}

/// Validated input for a create-or-update call. `None` means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteParams {
    pub addr: String,
    pub cost: Option<i64>,
    pub cost_unit: Option<String>,
    pub value: Option<i64>,
    pub value_unit: Option<String>,
    pub status: Option<String>,
}

impl NoteParams {
    /// Defined fields in storage form. `addr` is never included.
    fn defined(&self) -> Vec<(&'static str, FieldValue)> {
        let mut out = Vec::new();
        if let Some(cost) = self.cost {
            out.push((fields::COST, FieldValue::Integer(cost)));
        }
        if let Some(ref unit) = self.cost_unit {
            out.push((fields::COST_UNIT, FieldValue::Text(unit.clone())));
        }
        if let Some(ref status) = self.status {
            out.push((fields::STATUS, FieldValue::Text(status.clone())));
        }
        if let Some(value) = self.value {
            out.push((fields::VALUE, FieldValue::Integer(value)));
        }
        if let Some(ref unit) = self.value_unit {
            out.push((fields::VALUE_UNIT, FieldValue::Text(unit.clone())));
        }
        out
    }
}

/// A stored Note: field name to value. The address lives only in the storage key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteRecord(BTreeMap<String, FieldValue>);

impl NoteRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    /// Overwrite every field `params` defines; leave the rest untouched.
    pub fn merge_defined(&mut self, params: &NoteParams) {
        for (field, value) in params.defined() {
            self.0.insert(field.to_string(), value);
        }
    }

    /// Attach the address recovered from the storage key.
    pub fn into_view(self, addr: impl Into<String>) -> NoteView {
        NoteView {
            addr: addr.into(),
            fields: self,
        }
    }
}

/// A record as returned to callers: its fields plus `addr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteView {
    pub addr: String,
    #[serde(flatten)]
    pub fields: NoteRecord,
}
