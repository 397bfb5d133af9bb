//! Lead field accessor

use super::{FieldAccessor, full_name, number, owner_name, raw, reference_name};
use crate::domain::{Column, EntityType, FieldValue, Record};

const COLUMNS: &[Column] = &[
    Column::new("name", "Name").sortable(),
    Column::new("email", "Email").sortable(),
    Column::new("company", "Company").sortable(),
    Column::new("source", "Source").sortable(),
    Column::new("status", "Status").fixed_width(12).sortable(),
    Column::new("score", "Score").fixed_width(6).sortable(),
    Column::new("owner", "Owner").sortable(),
    Column::new("createdAt", "Created").fixed_width(20).sortable(),
];

const SEARCHABLE: &[&str] = &["name", "email", "phone", "company", "source", "status"];

/// Leads: unqualified prospects, possibly without a company record yet
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadAccessor;

impl FieldAccessor for LeadAccessor {
    fn entity_type(&self) -> EntityType {
        EntityType::Lead
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
            // Leads carry either a free-text company name or a company reference
            "company" => match reference_name(record, "companyName") {
                FieldValue::Null => reference_name(record, "company"),
                name => name,
            },
            "score" => number(record, field),
            "owner" => owner_name(record, "owner"),
            _ => raw(record, field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_company_prefers_free_text() {
        let lead = Record::try_from(json!({
            "firstName": "Linus",
            "companyName": "Kernel Inc",
            "company": {"name": "Ignored"},
        }))
        .expect("object");
        assert_eq!(LeadAccessor.derive(&lead, "company"), FieldValue::Text("Kernel Inc".into()));
        assert_eq!(LeadAccessor.derive(&lead, "name"), FieldValue::Text("Linus".into()));
    }

    #[test]
    fn test_company_falls_back_to_reference() {
        let lead = Record::try_from(json!({"company": {"name": "Acme"}})).expect("object");
        assert_eq!(LeadAccessor.derive(&lead, "company"), FieldValue::Text("Acme".into()));
    }
}
