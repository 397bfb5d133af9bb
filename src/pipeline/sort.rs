//! Sort stage
//!
//! Stable single-key sort on derived values. The comparison is chosen once
//! per run: numeric when every non-null key is a number, by timestamp when
//! every one is a date, otherwise lower-cased text. Null keys go last in both
//! directions.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::accessors::FieldAccessor;
use crate::domain::{FieldValue, Record, SortSpec};

/// How keys of one sort run are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortMode {
    Numeric,
    Timestamp,
    Text,
}

impl SortMode {
    fn detect(values: &[FieldValue]) -> Self {
        let present: Vec<&FieldValue> = values.iter().filter(|v| !v.is_null()).collect();
        if present.is_empty() {
            return Self::Text;
        }
        if present.iter().all(|v| v.as_number().is_some()) {
            Self::Numeric
        } else if present.iter().all(|v| v.as_timestamp().is_some()) {
            Self::Timestamp
        } else {
            Self::Text
        }
    }
}

/// Comparable form of a derived value under one `SortMode`
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
    Null,
}

impl SortKey {
    fn new(value: &FieldValue, mode: SortMode) -> Self {
        if value.is_null() {
            return Self::Null;
        }
        let key = match mode {
            SortMode::Numeric => value.as_number().map(Self::Number),
            SortMode::Timestamp => value.as_timestamp().map(Self::Date),
            SortMode::Text => None,
        };
        key.or_else(|| value.display().map(|text| Self::Text(text.to_lowercase())))
            .unwrap_or(Self::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Date(_) => 1,
            Self::Text(_) => 2,
            Self::Null => 3,
        }
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Sort rows by `spec`; no spec keeps the input order
pub fn apply<A: FieldAccessor + ?Sized>(
    records: &[Record],
    rows: &mut Vec<usize>,
    spec: Option<&SortSpec>,
    accessor: &A,
) {
    let Some(spec) = spec else {
        return;
    };

    let values: Vec<FieldValue> = rows
        .iter()
        .map(|&index| accessor.derive(&records[index], &spec.field))
        .collect();
    let mode = SortMode::detect(&values);

    let mut keyed: Vec<(SortKey, usize)> = values
        .iter()
        .zip(rows.iter())
        .map(|(value, &index)| (SortKey::new(value, mode), index))
        .collect();

    // `sort_by` is stable: equal keys keep their incoming order in both directions.
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (SortKey::Null, SortKey::Null) => Ordering::Equal,
        (SortKey::Null, _) => Ordering::Greater,
        (_, SortKey::Null) => Ordering::Less,
        _ => spec.direction.apply(a.natural_cmp(b)),
    });

    *rows = keyed.into_iter().map(|(_, index)| index).collect();
}
