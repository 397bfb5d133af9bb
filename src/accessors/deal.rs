//! Deal field accessor

use super::{FieldAccessor, number, owner_name, person_name, raw, reference_name};
use crate::domain::{Column, EntityType, FieldValue, Record};

const COLUMNS: &[Column] = &[
    Column::new("title", "Title").sortable(),
    Column::new("company", "Company").sortable(),
    Column::new("contact", "Contact").sortable(),
    Column::new("amount", "Amount").fixed_width(12).sortable(),
    Column::new("stage", "Stage").fixed_width(14).sortable(),
    Column::new("probability", "Prob. %").fixed_width(8).sortable(),
    Column::new("expectedCloseDate", "Close Date").fixed_width(20).sortable(),
    Column::new("owner", "Owner").sortable(),
];

const SEARCHABLE: &[&str] = &["title", "company", "contact", "stage", "owner"];

/// Deals: sales opportunities moving through pipeline stages
#[derive(Debug, Clone, Copy, Default)]
pub struct DealAccessor;

impl FieldAccessor for DealAccessor {
    fn entity_type(&self) -> EntityType {
        EntityType::Deal
    }

    fn columns(&self) -> &'static [Column] {
        COLUMNS
    }

    fn searchable_fields(&self) -> &'static [&'static str] {
        SEARCHABLE
    }

    fn derive(&self, record: &Record, field: &str) -> FieldValue {
        match field {
            "title" => match record.text("title").or_else(|| record.text("name")) {
                Some(title) => FieldValue::Text(title.to_string()),
                None => FieldValue::Null,
            },
            "company" => reference_name(record, "company"),
            "contact" => person_name(record, "contact").map_or(FieldValue::Null, FieldValue::Text),
            "amount" | "probability" => number(record, field),
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
    fn test_deal_fields() {
        let deal = Record::try_from(json!({
            "id": "d1",
            "name": "Renewal",
            "amount": "5000",
            "contact": {"firstName": "Alan", "lastName": "Turing"},
            "expectedCloseDate": "2025-06-30",
        }))
        .expect("object");

        assert_eq!(DealAccessor.derive(&deal, "title"), FieldValue::Text("Renewal".into()));
        assert_eq!(DealAccessor.derive(&deal, "amount"), FieldValue::Number(5000.0));
        assert_eq!(DealAccessor.derive(&deal, "contact"), FieldValue::Text("Alan Turing".into()));
        assert!(matches!(
            DealAccessor.derive(&deal, "expectedCloseDate"),
            FieldValue::Date(_)
        ));
        assert_eq!(DealAccessor.derive(&deal, "company"), FieldValue::Null);
    }
}
