//! Task field accessor

use super::{FieldAccessor, owner_name, person_name, raw, reference_name};
use crate::domain::{Column, EntityType, FieldValue, Record};

const COLUMNS: &[Column] = &[
    Column::new("title", "Title").sortable(),
    Column::new("status", "Status").fixed_width(12).sortable(),
    Column::new("priority", "Priority").fixed_width(10).sortable(),
    Column::new("dueDate", "Due").fixed_width(20).sortable(),
    Column::new("assignedTo", "Assignee").sortable(),
    Column::new("relatedTo", "Related To"),
];

const SEARCHABLE: &[&str] = &["title", "description", "status", "priority", "assignedTo", "relatedTo"];

/// Tasks: follow-ups assigned to users, optionally tied to a deal, contact or company
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskAccessor;

impl FieldAccessor for TaskAccessor {
    fn entity_type(&self) -> EntityType {
        EntityType::Task
    }

    fn columns(&self) -> &'static [Column] {
        COLUMNS
    }

    fn searchable_fields(&self) -> &'static [&'static str] {
        SEARCHABLE
    }

    fn derive(&self, record: &Record, field: &str) -> FieldValue {
        match field {
            "assignedTo" => owner_name(record, "assignedTo"),
            "relatedTo" => related_to(record),
            _ => raw(record, field),
        }
    }
}

/// First linked entity: deal, then contact, then company
fn related_to(record: &Record) -> FieldValue {
    if let name @ FieldValue::Text(_) = reference_name(record, "deal") {
        return name;
    }
    if let Some(name) = person_name(record, "contact") {
        return FieldValue::Text(name);
    }
    reference_name(record, "company")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_related_to_order() {
        let with_deal = Record::try_from(json!({
            "deal": {"id": "d1", "title": "Big Renewal"},
            "contact": {"firstName": "Ada"},
        }))
        .expect("object");
        assert_eq!(related_to(&with_deal), FieldValue::Text("Big Renewal".into()));

        let with_contact = Record::try_from(json!({
            "contact": {"firstName": "Ada", "lastName": "L"},
            "company": {"name": "Acme"},
        }))
        .expect("object");
        assert_eq!(related_to(&with_contact), FieldValue::Text("Ada L".into()));

        let bare = Record::try_from(json!({"title": "Call"})).expect("object");
        assert_eq!(related_to(&bare), FieldValue::Null);
    }

    #[test]
    fn test_assignee_defaults_to_unassigned() {
        let task = Record::try_from(json!({"title": "Call back"})).expect("object");
        assert_eq!(
            TaskAccessor.derive(&task, "assignedTo"),
            FieldValue::Text("Unassigned".into())
        );
    }
}
