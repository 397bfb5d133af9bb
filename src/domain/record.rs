//! Record - CRM Entity Record Snapshot

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::value::FieldValue;
use crate::error::{Error, Result};

/// Shared, immutable collection of records as fetched from a data source
pub type RecordSet = Arc<Vec<Record>>;

/// One entity instance (contact, company, deal, lead, task) as a field map.
///
/// Records are snapshots: nothing in the crate mutates one after it is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Stable identity used for selection. Numeric ids are rendered as strings.
    pub fn id(&self) -> Option<String> {
        match self.fields.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Top-level field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Field addressed by a dotted path, e.g. `company.name`
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(path) {
            return Some(value);
        }
        let mut parts = path.split('.');
        let mut current = self.fields.get(parts.next()?)?;
        for part in parts {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Raw value at `path` as a FieldValue (missing → `Null`)
    pub fn field_value(&self, path: &str) -> FieldValue {
        FieldValue::from_json(self.get_path(path))
    }

    /// String field, ignoring blanks
    pub fn text(&self, path: &str) -> Option<&str> {
        self.get_path(path)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

impl TryFrom<Value> for Record {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            other => Err(Error::Invalid {
                message: format!("record must be a JSON object, got {other}"),
            }),
        }
    }
}
