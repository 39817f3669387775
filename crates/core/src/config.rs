//! Access layer configuration with defaults and validation

use crate::constants::{
    DEFAULT_LIST_CACHE_TTL_SECS, DEFAULT_PAGE_LIMIT, DEFAULT_SORT_FIELD, MAX_PAGE_LIMIT,
};
use crate::errors::{Error, Result};
use crate::types::{ResourceKind, SortDirection};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the anonymous list cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Whether anonymous list results are cached at all
    pub enabled: bool,
    /// Lifetime of a cached page in seconds
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: DEFAULT_LIST_CACHE_TTL_SECS,
        }
    }
}

impl CacheSettings {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Settings for cursor pagination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
    /// Page size when the request does not name one
    pub default_limit: usize,
    /// Upper bound on any requested page size
    pub max_limit: usize,
    /// Sort field when the request does not name one
    pub default_sort_field: String,
    /// Sort direction when the request does not name one
    pub default_direction: SortDirection,
}

impl PaginationSettings {
    /// Sort field used for a list of `kind` that names none.
    ///
    /// Kinds that cannot be ordered by the configured default fall back to
    /// creation time.
    #[must_use]
    pub fn default_sort_field_for(&self, kind: ResourceKind) -> &str {
        if kind.is_sortable_by(&self.default_sort_field) {
            &self.default_sort_field
        } else {
            DEFAULT_SORT_FIELD
        }
    }
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
            default_sort_field: DEFAULT_SORT_FIELD.to_string(),
            default_direction: SortDirection::Desc,
        }
    }
}

/// Complete access layer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    pub cache: CacheSettings,
    pub pagination: PaginationSettings,
}

impl AccessConfig {
    /// Start building a configuration from the defaults
    #[must_use]
    pub fn builder() -> AccessConfigBuilder {
        AccessConfigBuilder::new()
    }

    /// Reject settings the access layer cannot operate with
    pub fn validate(&self) -> Result<()> {
        if self.cache.enabled && self.cache.ttl_secs == 0 {
            return Err(Error::configuration(
                "cache.ttl_secs must be greater than zero when the cache is enabled",
            ));
        }
        if self.pagination.default_limit == 0 || self.pagination.max_limit == 0 {
            return Err(Error::configuration("page limits must be greater than zero"));
        }
        if self.pagination.default_limit > self.pagination.max_limit {
            return Err(Error::configuration(format!(
                "pagination.default_limit ({}) exceeds pagination.max_limit ({})",
                self.pagination.default_limit, self.pagination.max_limit
            )));
        }
        let field = &self.pagination.default_sort_field;
        if !ResourceKind::ALL.iter().any(|kind| kind.is_sortable_by(field)) {
            return Err(Error::configuration(format!(
                "pagination.default_sort_field '{field}' is not sortable for any resource kind"
            )));
        }
        Ok(())
    }
}

/// Builder for creating access configurations
#[derive(Debug, Default)]
pub struct AccessConfigBuilder {
    config: AccessConfig,
}

impl AccessConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the anonymous list cache
    #[must_use]
    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.config.cache.enabled = enabled;
        self
    }

    /// Set the anonymous list cache TTL
    #[must_use]
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.cache.ttl_secs = ttl.as_secs();
        self
    }

    /// Set the default and maximum page sizes
    #[must_use]
    pub fn page_limits(mut self, default_limit: usize, max_limit: usize) -> Self {
        self.config.pagination.default_limit = default_limit;
        self.config.pagination.max_limit = max_limit;
        self
    }

    /// Set the default ordering
    #[must_use]
    pub fn default_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.config.pagination.default_sort_field = field.into();
        self.config.pagination.default_direction = direction;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<AccessConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
