//! FieldValue - Derived Field Values
//!
//! The value a FieldAccessor derives from a record, used by search, filters
//! and sort alike.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::cmp::Ordering;

use crate::constants::MISSING_FIELD_SENTINEL;

/// A derived field value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Missing key, JSON null, or an object with no display form
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Convert a raw JSON value. Objects map to `Null`; accessors derive them.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) | Some(Value::Object(_)) => Self::Null,
            Some(Value::Bool(b)) => Self::Bool(*b),
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Null, Self::Number),
            Some(Value::String(s)) => Self::Text(s.clone()),
            Some(Value::Array(items)) => {
                Self::List(items.iter().map(|v| Self::from_json(Some(v))).collect())
            }
        }
    }

    /// Text value, or `Null` when the text is empty after trimming
    pub fn non_empty(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::Null
        } else {
            Self::Text(text)
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view: numbers, and text that parses as a finite number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Timestamp view: dates, and text that parses as a date
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Text(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// Display string, `None` for null
    pub fn display(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Text(s) => Some(s.clone()),
            Self::Date(d) => Some(d.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().filter_map(FieldValue::display).collect();
                Some(parts.join(", "))
            }
        }
    }

    /// Display string with the missing-field sentinel for null
    pub fn display_or_sentinel(&self) -> String {
        self.display()
            .unwrap_or_else(|| MISSING_FIELD_SENTINEL.to_string())
    }

    /// Type-aware equality used by `equals`, `not_equals`, `in` and `not_in`.
    ///
    /// Strings compare case-sensitively; a numeric string equals the number it
    /// spells.
    pub fn loosely_equals(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Null, _) | (_, Self::Null) => false,
            (Self::Number(a), _) => other.as_number().is_some_and(|b| *a == b),
            (Self::Date(a), _) => other.as_timestamp().is_some_and(|b| *a == b),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Bool(a), Self::Text(t)) => t.parse::<bool>().is_ok_and(|b| *a == b),
            (Self::Bool(_), _) => false,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Text(_), Self::Number(b)) => self.as_number().is_some_and(|a| a == *b),
            (Self::Text(_), Self::Date(b)) => self.as_timestamp().is_some_and(|a| a == *b),
            (Self::Text(a), Self::Bool(b)) => a.parse::<bool>().is_ok_and(|a| a == *b),
            (Self::Text(_), Self::List(_)) => false,
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loosely_equals(y))
            }
            (Self::List(_), _) => false,
        }
    }

    /// Numeric or date ordering; `None` when the values are not comparable
    pub fn compare_ordered(&self, other: &FieldValue) -> Option<Ordering> {
        if let (Some(a), Some(b)) = (self.as_number(), other.as_number()) {
            return a.partial_cmp(&b);
        }
        if let (Some(a), Some(b)) = (self.as_timestamp(), other.as_timestamp()) {
            return Some(a.cmp(&b));
        }
        None
    }
}

/// Parse the timestamp formats the CRM API emits.
///
/// Accepts RFC 3339, naive `YYYY-MM-DD[T ]HH:MM:SS[.fff]` (read as UTC) and
/// plain `YYYY-MM-DD`.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.len() < 10 {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        assert_eq!(FieldValue::from_json(None), FieldValue::Null);
        assert_eq!(FieldValue::from_json(Some(&json!(null))), FieldValue::Null);
        assert_eq!(FieldValue::from_json(Some(&json!({"id": 1}))), FieldValue::Null);
        assert_eq!(FieldValue::from_json(Some(&json!(42))), FieldValue::Number(42.0));
        assert_eq!(
            FieldValue::from_json(Some(&json!(["a", 1]))),
            FieldValue::List(vec![FieldValue::Text("a".into()), FieldValue::Number(1.0)])
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Number(50000.0).display().as_deref(), Some("50000"));
        assert_eq!(FieldValue::Number(12.5).display().as_deref(), Some("12.5"));
        assert_eq!(FieldValue::Null.display_or_sentinel(), "--");
        let date = parse_timestamp("2024-03-01").expect("date");
        assert_eq!(
            FieldValue::Date(date).display().as_deref(),
            Some("2024-03-01T00:00:00Z")
        );
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-03-01T10:20:30.123Z").is_some());
        assert!(parse_timestamp("2024-03-01T10:20:30+02:00").is_some());
        assert!(parse_timestamp("2024-03-01 10:20:30").is_some());
        assert!(parse_timestamp("2024-03-01").is_some());
        assert!(parse_timestamp("555-1234").is_none());
        assert!(parse_timestamp("Acme Corp").is_none());
    }

    #[test]
    fn test_loose_equality() {
        let amount = FieldValue::Number(50.0);
        assert!(amount.loosely_equals(&FieldValue::Text("50".into())));
        assert!(FieldValue::Text("50.00".into()).loosely_equals(&FieldValue::Number(50.0)));
        assert!(!FieldValue::Text("Acme".into()).loosely_equals(&FieldValue::Text("acme".into())));
        assert!(FieldValue::Null.loosely_equals(&FieldValue::Null));
        assert!(!FieldValue::Null.loosely_equals(&FieldValue::Text("--".into())));
        assert!(FieldValue::Bool(true).loosely_equals(&FieldValue::Text("true".into())));
    }

    #[test]
    fn test_compare_ordered() {
        let a = FieldValue::Number(10.0);
        let b = FieldValue::Text("9".into());
        assert_eq!(a.compare_ordered(&b), Some(Ordering::Greater));

        let d1 = FieldValue::Text("2024-01-01".into());
        let d2 = FieldValue::Text("2024-06-01T00:00:00Z".into());
        assert_eq!(d1.compare_ordered(&d2), Some(Ordering::Less));

        assert_eq!(FieldValue::Text("abc".into()).compare_ordered(&a), None);
        assert_eq!(FieldValue::Null.compare_ordered(&a), None);
    }
}
