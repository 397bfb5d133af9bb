//! Structured filter stage
//!
//! Every well-formed condition must hold (AND). Malformed conditions are
//! skipped so the stage never fails.

use serde_json::Value;
use std::cmp::Ordering;

use crate::accessors::FieldAccessor;
use crate::domain::{FieldValue, FilterCondition, Operator, Record};

/// Keep rows matching all conditions
pub fn apply<A: FieldAccessor + ?Sized>(
    records: &[Record],
    rows: &mut Vec<usize>,
    filters: &[FilterCondition],
    accessor: &A,
) {
    let active: Vec<&FilterCondition> = filters
        .iter()
        .filter(|condition| match condition.malformed_reason() {
            None => true,
            Some(reason) => {
                tracing::warn!(
                    field = %condition.field,
                    operator = %condition.operator,
                    "Skipping malformed filter: {reason}"
                );
                false
            }
        })
        .collect();

    if active.is_empty() {
        return;
    }

    rows.retain(|&index| {
        let record = &records[index];
        active.iter().all(|condition| {
            let value = accessor.derive(record, &condition.field);
            matches(&text_source(record, condition, value), condition)
        })
    });
}

/// Text operators on a parsed date test the string the record holds
fn text_source(record: &Record, condition: &FilterCondition, value: FieldValue) -> FieldValue {
    let text_operator = matches!(
        condition.operator,
        Operator::Contains | Operator::NotContains | Operator::StartsWith | Operator::EndsWith
    );
    match (&value, record.get_path(&condition.field)) {
        (FieldValue::Date(_), Some(Value::String(source))) if text_operator => {
            FieldValue::Text(source.clone())
        }
        _ => value,
    }
}

/// Evaluate one condition against a derived field value.
///
/// A malformed condition matches everything.
pub fn matches(value: &FieldValue, condition: &FilterCondition) -> bool {
    if condition.malformed_reason().is_some() {
        return true;
    }

    let target = condition.value.as_ref();
    match condition.operator {
        Operator::IsNull => value.is_null(),
        Operator::IsNotNull => !value.is_null(),
        Operator::Equals => value.loosely_equals(&FieldValue::from_json(target)),
        Operator::NotEquals => !value.loosely_equals(&FieldValue::from_json(target)),
        Operator::Contains => text_test(value, target, |hay, needle| hay.contains(needle)),
        Operator::NotContains => !text_test(value, target, |hay, needle| hay.contains(needle)),
        Operator::StartsWith => text_test(value, target, |hay, needle| hay.starts_with(needle)),
        Operator::EndsWith => text_test(value, target, |hay, needle| hay.ends_with(needle)),
        Operator::GreaterThan => ordered(value, target, |o| o == Ordering::Greater),
        Operator::LessThan => ordered(value, target, |o| o == Ordering::Less),
        Operator::GreaterThanOrEqual => ordered(value, target, |o| o != Ordering::Less),
        Operator::LessThanOrEqual => ordered(value, target, |o| o != Ordering::Greater),
        Operator::Between => match target {
            Some(Value::Array(bounds)) => {
                ordered(value, bounds.first(), |o| o != Ordering::Less)
                    && ordered(value, bounds.get(1), |o| o != Ordering::Greater)
            }
            _ => true,
        },
        Operator::In => in_list(value, target),
        Operator::NotIn => !in_list(value, target),
    }
}

/// Case-insensitive string test; null never matches
fn text_test(value: &FieldValue, target: Option<&Value>, test: impl Fn(&str, &str) -> bool) -> bool {
    let Some(haystack) = value.display() else {
        return false;
    };
    let needle = FieldValue::from_json(target).display().unwrap_or_default();
    test(&haystack.to_lowercase(), &needle.to_lowercase())
}

/// Numeric/date ordering test; incomparable values fail
fn ordered(value: &FieldValue, target: Option<&Value>, accept: impl Fn(Ordering) -> bool) -> bool {
    value
        .compare_ordered(&FieldValue::from_json(target))
        .is_some_and(accept)
}

fn in_list(value: &FieldValue, target: Option<&Value>) -> bool {
    match target {
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| value.loosely_equals(&FieldValue::from_json(Some(item)))),
        _ => false,
    }
}
