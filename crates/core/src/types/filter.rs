//! Storage filter and ordering language.
//!
//! Filters are plain data: the access layer composes them and a storage
//! adapter translates them into its own query form. Nothing here evaluates a
//! filter against data.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Binary comparison between a field and a JSON scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

/// A predicate over entity fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Filter {
    /// Matches everything
    #[default]
    True,
    /// Every child must match
    All(Vec<Filter>),
    /// At least one child must match
    Any(Vec<Filter>),
    Not(Box<Filter>),
    Compare {
        field: String,
        op: ComparisonOp,
        value: Value,
    },
}

impl Filter {
    #[must_use]
    pub fn compare(field: impl Into<String>, op: ComparisonOp, value: impl Into<Value>) -> Self {
        Filter::Compare {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, ComparisonOp::Eq, value)
    }

    /// Conjunction that flattens nested `All` and drops `True`
    #[must_use]
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        let mut parts = Vec::new();
        for filter in filters {
            match filter {
                Filter::True => {}
                Filter::All(inner) => parts.extend(inner),
                other => parts.push(other),
            }
        }
        match parts.len() {
            0 => Filter::True,
            1 => parts.remove(0),
            _ => Filter::All(parts),
        }
    }

    /// Disjunction that flattens nested `Any`; any `True` child makes the
    /// whole disjunction `True`
    #[must_use]
    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        let mut parts = Vec::new();
        for filter in filters {
            match filter {
                Filter::True => return Filter::True,
                Filter::Any(inner) => parts.extend(inner),
                other => parts.push(other),
            }
        }
        match parts.len() {
            1 => parts.remove(0),
            _ => Filter::Any(parts),
        }
    }

    #[must_use]
    pub fn and(self, other: Filter) -> Self {
        Self::all([self, other])
    }

    #[must_use]
    pub fn or(self, other: Filter) -> Self {
        Self::any([self, other])
    }

    #[must_use]
    pub fn is_true(&self) -> bool {
        matches!(self, Filter::True)
    }
}

/// Sort direction of a list query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Strict comparison selecting rows that come after a position
    #[must_use]
    pub fn after_op(&self) -> ComparisonOp {
        match self {
            SortDirection::Asc => ComparisonOp::Gt,
            SortDirection::Desc => ComparisonOp::Lt,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(Error::validation(
                "sortOrder",
                format!("'{other}' must be 'asc' or 'desc'"),
            )),
        }
    }
}

/// One key of a store ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    #[must_use]
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}
