//! Company field accessor

use super::{FieldAccessor, number, owner_name, raw};
use crate::domain::{Column, EntityType, FieldValue, Record};

const COLUMNS: &[Column] = &[
    Column::new("name", "Name").sortable(),
    Column::new("industry", "Industry").sortable(),
    Column::new("website", "Website"),
    Column::new("phone", "Phone").fixed_width(16),
    Column::new("city", "City").sortable(),
    Column::new("country", "Country").sortable(),
    Column::new("employees", "Employees").fixed_width(10).sortable(),
    Column::new("annualRevenue", "Revenue").fixed_width(14).sortable(),
    Column::new("owner", "Owner").sortable(),
    Column::new("createdAt", "Created").fixed_width(20).sortable(),
];

const SEARCHABLE: &[&str] = &["name", "email", "phone", "website", "industry", "city", "country"];

/// Companies: accounts owning contacts and deals
#[derive(Debug, Clone, Copy, Default)]
pub struct CompanyAccessor;

impl FieldAccessor for CompanyAccessor {
    fn entity_type(&self) -> EntityType {
        EntityType::Company
    }

    fn columns(&self) -> &'static [Column] {
        COLUMNS
    }

    fn searchable_fields(&self) -> &'static [&'static str] {
        SEARCHABLE
    }

    fn derive(&self, record: &Record, field: &str) -> FieldValue {
        match field {
            "employees" | "annualRevenue" => number(record, field),
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
    fn test_revenue_is_numeric() {
        let company = Record::try_from(json!({
            "id": "c1",
            "name": "Acme Corp",
            "annualRevenue": "1200000.00",
            "employees": 250,
        }))
        .expect("object");

        assert_eq!(
            CompanyAccessor.derive(&company, "annualRevenue"),
            FieldValue::Number(1_200_000.0)
        );
        assert_eq!(CompanyAccessor.derive(&company, "employees"), FieldValue::Number(250.0));
        assert_eq!(CompanyAccessor.derive(&company, "name"), FieldValue::Text("Acme Corp".into()));
    }
}
