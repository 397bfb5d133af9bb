//! EntityType - CRM Entity Kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::accessors::{
    CompanyAccessor, ContactAccessor, DealAccessor, FieldAccessor, LeadAccessor, TaskAccessor,
};
use crate::error::Error;

/// The entity types the CRM exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Contact,
    Company,
    Deal,
    Lead,
    Task,
}

impl EntityType {
    pub const ALL: [EntityType; 5] = [
        Self::Contact,
        Self::Company,
        Self::Deal,
        Self::Lead,
        Self::Task,
    ];

    /// API collection path segment
    pub fn collection(self) -> &'static str {
        match self {
            Self::Contact => "contacts",
            Self::Company => "companies",
            Self::Deal => "deals",
            Self::Lead => "leads",
            Self::Task => "tasks",
        }
    }

    /// Plural display label
    pub fn label(self) -> &'static str {
        match self {
            Self::Contact => "Contacts",
            Self::Company => "Companies",
            Self::Deal => "Deals",
            Self::Lead => "Leads",
            Self::Task => "Tasks",
        }
    }

    /// Field accessor strategy for this entity type
    pub fn accessor(self) -> Box<dyn FieldAccessor> {
        match self {
            Self::Contact => Box::new(ContactAccessor),
            Self::Company => Box::new(CompanyAccessor),
            Self::Deal => Box::new(DealAccessor),
            Self::Lead => Box::new(LeadAccessor),
            Self::Task => Box::new(TaskAccessor),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Contact => "contact",
            Self::Company => "company",
            Self::Deal => "deal",
            Self::Lead => "lead",
            Self::Task => "task",
        };
        f.write_str(name)
    }
}

impl FromStr for EntityType {
    type Err = Error;

    /// Accepts singular or plural names, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|e| e.to_string() == needle || e.collection() == needle)
            .ok_or_else(|| Error::Invalid {
                message: format!("Unknown entity type: {s}"),
            })
    }
}
