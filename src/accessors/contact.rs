//! Contact field accessor

use super::{FieldAccessor, full_name, owner_name, raw, reference_name};
use crate::domain::{Column, EntityType, FieldValue, Record};

const COLUMNS: &[Column] = &[
    Column::new("name", "Name").sortable(),
    Column::new("email", "Email").sortable(),
    Column::new("phone", "Phone").fixed_width(16),
    Column::new("company", "Company").sortable(),
    Column::new("jobTitle", "Job Title").sortable(),
    Column::new("owner", "Owner").sortable(),
    Column::new("createdAt", "Created").fixed_width(20).sortable(),
];

const SEARCHABLE: &[&str] = &["name", "email", "phone", "company", "jobTitle", "city", "country"];

/// Contacts: people attached to companies
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactAccessor;

impl FieldAccessor for ContactAccessor {
    fn entity_type(&self) -> EntityType {
        EntityType::Contact
    }

    fn columns(&self) -> &'static [Column] {
        COLUMNS
    }

    fn searchable_fields(&self) -> &'static [&'static str] {
        SEARCHABLE
    }

    fn derive(&self, record: &Record, field: &str) -> FieldValue {
        match field {
            "name" => full_name(record),
            "company" => reference_name(record, "company"),
            "owner" => owner_name(record, "owner"),
            _ => raw(record, field),
        }
    }
}
