//! Sort - Single-Key Sort Specification

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Header indicator
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }

    /// Orient an ascending comparison
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// The active sort column and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    pub fn toggled(&self) -> Self {
        Self {
            field: self.field.clone(),
            direction: self.direction.toggled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let spec = SortSpec::asc("amount");
        assert_eq!(spec.toggled().direction, SortDirection::Desc);
        assert_eq!(spec.toggled().toggled(), spec);
    }

    #[test]
    fn test_direction_apply() {
        assert_eq!(SortDirection::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn test_direction_defaults_to_asc() {
        let spec: SortSpec = serde_json::from_str(r#"{"field":"name"}"#).expect("valid spec");
        assert_eq!(spec.direction, SortDirection::Asc);
    }
}
