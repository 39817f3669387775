//! Resource collections served by the content API

use crate::constants::{
    FIELD_CREATED_AT, FIELD_NAME, FIELD_UPDATED_AT, FIELD_USERNAME, LIST_CACHE_SEGMENT,
};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A collection of owned, visibility-tagged entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Characters,
    Races,
    Items,
    Skills,
    Perks,
    Images,
    Tags,
    Users,
}

const NAMED_SORT_FIELDS: &[&str] = &[FIELD_CREATED_AT, FIELD_UPDATED_AT, FIELD_NAME];
const USER_SORT_FIELDS: &[&str] = &[FIELD_CREATED_AT, FIELD_UPDATED_AT, FIELD_USERNAME];
const IMAGE_SORT_FIELDS: &[&str] = &[FIELD_CREATED_AT, FIELD_UPDATED_AT];

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Characters,
        ResourceKind::Races,
        ResourceKind::Items,
        ResourceKind::Skills,
        ResourceKind::Perks,
        ResourceKind::Images,
        ResourceKind::Tags,
        ResourceKind::Users,
    ];

    /// Collection name, also the first segment of every cache key
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Characters => "characters",
            ResourceKind::Races => "races",
            ResourceKind::Items => "items",
            ResourceKind::Skills => "skills",
            ResourceKind::Perks => "perks",
            ResourceKind::Images => "images",
            ResourceKind::Tags => "tags",
            ResourceKind::Users => "users",
        }
    }

    /// Human-readable singular noun, used in error messages
    #[must_use]
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Characters => "character",
            ResourceKind::Races => "race",
            ResourceKind::Items => "item",
            ResourceKind::Skills => "skill",
            ResourceKind::Perks => "perk",
            ResourceKind::Images => "image",
            ResourceKind::Tags => "tag",
            ResourceKind::Users => "user",
        }
    }

    /// Prefix shared by every anonymous list cache entry of this kind
    #[must_use]
    pub fn list_prefix(&self) -> String {
        format!("{}:{LIST_CACHE_SEGMENT}", self.as_str())
    }

    /// Fields a list of this kind may be ordered by
    #[must_use]
    pub fn sortable_fields(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Users => USER_SORT_FIELDS,
            ResourceKind::Images => IMAGE_SORT_FIELDS,
            _ => NAMED_SORT_FIELDS,
        }
    }

    #[must_use]
    pub fn is_sortable_by(&self, field: &str) -> bool {
        self.sortable_fields().contains(&field)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::validation("resource kind", format!("unknown collection '{s}'")))
    }
}
