//! Filter - Structured Filter Conditions
//!
//! Conditions are built by the filter builder and validated there; the
//! pipeline treats anything malformed as pass-through.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Comparison operator of a filter condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Between,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

impl Operator {
    /// Whether the condition needs a value
    pub fn requires_value(self) -> bool {
        !matches!(self, Self::IsNull | Self::IsNotNull)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::GreaterThanOrEqual => "greater_than_or_equal",
            Self::LessThanOrEqual => "less_than_or_equal",
            Self::Between => "between",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::IsNull => "is_null",
            Self::IsNotNull => "is_not_null",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a condition combines with its neighbours.
///
/// Reserved: it is carried through serialization but never evaluated. All
/// conditions are combined with AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    And,
    Or,
}

/// A single structured filter condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    /// Field name or dotted path
    pub field: String,
    pub operator: Operator,
    /// Comparison value; a 2-element array for `between`, an array for `in`/`not_in`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Reserved, see [`LogicalOperator`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_operator: Option<LogicalOperator>,
}

impl FilterCondition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: Some(value.into()),
            logical_operator: None,
        }
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self::without_value(field, Operator::IsNull)
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::without_value(field, Operator::IsNotNull)
    }

    pub fn between(field: impl Into<String>, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::new(field, Operator::Between, Value::Array(vec![low.into(), high.into()]))
    }

    fn without_value(field: impl Into<String>, operator: Operator) -> Self {
        Self {
            field: field.into(),
            operator,
            value: None,
            logical_operator: None,
        }
    }

    /// Reason this condition is malformed, if it is
    pub fn malformed_reason(&self) -> Option<&'static str> {
        if self.field.trim().is_empty() {
            return Some("field name is empty");
        }
        if !self.operator.requires_value() {
            return None;
        }
        match (&self.value, self.operator) {
            (None | Some(Value::Null), _) => Some("a value is required"),
            (Some(Value::Array(items)), Operator::Between) if items.len() == 2 => None,
            (Some(_), Operator::Between) => Some("between needs exactly two values"),
            (Some(Value::Array(_)), Operator::In | Operator::NotIn) => None,
            (Some(_), Operator::In | Operator::NotIn) => Some("in/not_in need a list of values"),
            (Some(_), _) => None,
        }
    }

    /// Reject malformed conditions when a filter list is being built
    pub fn validate(&self) -> Result<()> {
        match self.malformed_reason() {
            None => Ok(()),
            Some(reason) => Err(Error::InvalidFilter {
                field: self.field.clone(),
                message: format!("{}: {reason}", self.operator),
            }),
        }
    }
}

/// Validate every condition of a filter list
pub fn validate_filters(filters: &[FilterCondition]) -> Result<()> {
    filters.iter().try_for_each(FilterCondition::validate)
}

/// JSON Schema of a filter list, for filter builders
pub fn filter_schema() -> schemars::Schema {
    schemars::schema_for!(Vec<FilterCondition>)
}
