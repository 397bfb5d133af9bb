//! Field Accessors
//!
//! Per-entity strategies mapping a record and a field name to the derived
//! value used for display, search, filtering and sorting. One generic
//! browser serves every entity type through this trait.

mod company;
mod contact;
mod deal;
mod lead;
mod task;

pub use company::CompanyAccessor;
pub use contact::ContactAccessor;
pub use deal::DealAccessor;
pub use lead::LeadAccessor;
pub use task::TaskAccessor;

use serde_json::Value;

use crate::constants::UNASSIGNED_OWNER;
use crate::domain::{Column, EntityType, FieldValue, Record, parse_timestamp};

/// Trait for deriving field values from records of one entity type
pub trait FieldAccessor: Send + Sync {
    /// Entity type this accessor serves
    fn entity_type(&self) -> EntityType;

    /// Display columns, in order
    fn columns(&self) -> &'static [Column];

    /// Fields the free-text search looks at
    fn searchable_fields(&self) -> &'static [&'static str];

    /// Fields a sort may be applied to
    fn sortable_fields(&self) -> Vec<&'static str> {
        self.columns()
            .iter()
            .filter(|c| c.sortable)
            .map(|c| c.id)
            .collect()
    }

    /// Check if a field is sortable
    fn is_sortable(&self, field: &str) -> bool {
        self.columns().iter().any(|c| c.sortable && c.id == field)
    }

    /// Derive a field value. Unknown fields fall back to the raw record value.
    fn derive(&self, record: &Record, field: &str) -> FieldValue {
        raw(record, field)
    }
}

impl<A: FieldAccessor + ?Sized> FieldAccessor for Box<A> {
    fn entity_type(&self) -> EntityType {
        (**self).entity_type()
    }

    fn columns(&self) -> &'static [Column] {
        (**self).columns()
    }

    fn searchable_fields(&self) -> &'static [&'static str] {
        (**self).searchable_fields()
    }

    fn sortable_fields(&self) -> Vec<&'static str> {
        (**self).sortable_fields()
    }

    fn is_sortable(&self, field: &str) -> bool {
        (**self).is_sortable(field)
    }

    fn derive(&self, record: &Record, field: &str) -> FieldValue {
        (**self).derive(record, field)
    }
}

// ==================== Derivation helpers ====================

/// Raw value at a dotted path. Blank strings are null; timestamps in
/// `*At`/`*Date` fields become dates.
pub fn raw(record: &Record, field: &str) -> FieldValue {
    match record.field_value(field) {
        FieldValue::Text(text) => {
            if is_date_field(field) {
                if let Some(ts) = parse_timestamp(&text) {
                    return FieldValue::Date(ts);
                }
            }
            FieldValue::non_empty(text)
        }
        other => other,
    }
}

fn is_date_field(field: &str) -> bool {
    let leaf = field.rsplit('.').next().unwrap_or(field);
    leaf.ends_with("At") || leaf.ends_with("Date") || leaf == "date"
}

/// Number stored either as a JSON number or a numeric string (decimals)
pub fn number(record: &Record, field: &str) -> FieldValue {
    match record.field_value(field) {
        FieldValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map_or(FieldValue::Text(text), FieldValue::Number),
        other => other,
    }
}

/// `"{first} {last}"` from two fields of the same object, `None` when both are blank
fn join_name(first: Option<&Value>, last: Option<&Value>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Full name from the record's own `firstName`/`lastName`
pub fn full_name(record: &Record) -> FieldValue {
    join_name(record.get("firstName"), record.get("lastName"))
        .map_or(FieldValue::Null, FieldValue::Text)
}

/// Name of a nested person object (`{firstName, lastName}`), or a plain string
pub fn person_name(record: &Record, field: &str) -> Option<String> {
    match record.get_path(field)? {
        Value::Object(person) => join_name(person.get("firstName"), person.get("lastName"))
            .or_else(|| {
                person
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            }),
        Value::String(name) if !name.trim().is_empty() => Some(name.trim().to_string()),
        _ => None,
    }
}

/// Owner/assignee display name, `"Unassigned"` when absent
pub fn owner_name(record: &Record, field: &str) -> FieldValue {
    FieldValue::Text(person_name(record, field).unwrap_or_else(|| UNASSIGNED_OWNER.to_string()))
}

/// Name of a nested `{id, name}` reference, or a plain string field
pub fn reference_name(record: &Record, field: &str) -> FieldValue {
    match record.get_path(field) {
        Some(Value::Object(reference)) => reference
            .get("name")
            .or_else(|| reference.get("title"))
            .and_then(Value::as_str)
            .map_or(FieldValue::Null, FieldValue::non_empty),
        Some(Value::String(name)) => FieldValue::non_empty(name.as_str()),
        _ => FieldValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::try_from(value).expect("object")
    }

    #[test]
    fn test_owner_name() {
        let owned = record(json!({"owner": {"firstName": "Ada", "lastName": "Lovelace"}}));
        assert_eq!(owner_name(&owned, "owner"), FieldValue::Text("Ada Lovelace".into()));

        let half = record(json!({"owner": {"firstName": "Ada", "lastName": null}}));
        assert_eq!(owner_name(&half, "owner"), FieldValue::Text("Ada".into()));

        let none = record(json!({"owner": null}));
        assert_eq!(owner_name(&none, "owner"), FieldValue::Text("Unassigned".into()));
    }

    #[test]
    fn test_reference_name() {
        let r = record(json!({"company": {"id": "c1", "name": "Acme"}, "companyName": "Beta"}));
        assert_eq!(reference_name(&r, "company"), FieldValue::Text("Acme".into()));
        assert_eq!(reference_name(&r, "companyName"), FieldValue::Text("Beta".into()));
        assert_eq!(reference_name(&r, "missing"), FieldValue::Null);
    }

    #[test]
    fn test_raw_parses_date_fields() {
        let r = record(json!({"createdAt": "2024-01-02T03:04:05Z", "notes": "2024-01-02"}));
        assert!(matches!(raw(&r, "createdAt"), FieldValue::Date(_)));
        assert!(matches!(raw(&r, "notes"), FieldValue::Text(_)));
    }

    #[test]
    fn test_raw_blank_text_is_null() {
        let r = record(json!({"industry": "   ", "city": "", "country": "NL"}));
        assert_eq!(raw(&r, "industry"), FieldValue::Null);
        assert_eq!(raw(&r, "city"), FieldValue::Null);
        assert_eq!(raw(&r, "country"), FieldValue::Text("NL".into()));
    }

    #[test]
    fn test_number_from_decimal_string() {
        let r = record(json!({"amount": "1250.50", "label": "n/a"}));
        assert_eq!(number(&r, "amount"), FieldValue::Number(1250.5));
        assert_eq!(number(&r, "label"), FieldValue::Text("n/a".into()));
    }
}
