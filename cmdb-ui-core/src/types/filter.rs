//! Filter, search and sort criteria

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single per-field filter criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FilterCriterion {
    /// Field equals the value exactly
    Equals(Value),
    /// Field equals any of the values
    OneOf(Vec<Value>),
    /// Inclusive range; either bound may be open
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<Value>,
    },
    /// Case-insensitive substring match on the field
    Contains(String),
    /// `true`: field is null or missing. `false`: field has a value
    IsNull(bool),
}

impl FilterCriterion {
    /// Shorthand for an exact string match
    pub fn equals(value: impl Into<String>) -> Self {
        Self::Equals(Value::String(value.into()))
    }

    /// Whether the criterion constrains nothing (e.g. a range with no bounds)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::OneOf(values) => values.is_empty(),
            Self::Range { min, max } => min.is_none() && max.is_none(),
            Self::Contains(needle) => needle.is_empty(),
            Self::Equals(_) | Self::IsNull(_) => false,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Sort field plus direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    /// Dotted field path, e.g. `site.name`
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// Complete filter state, also the persisted representation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Ordered by field name so query and persisted forms are reproducible
    #[serde(default)]
    pub filters: BTreeMap<String, FilterCriterion>,
    #[serde(default)]
    pub global_search: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
}

impl FilterState {
    /// No search, no filters, no sort
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.filters.is_empty() && self.global_search.trim().is_empty() && self.sort.is_none()
    }
}
