//! Page requests, fetch plans and page assembly

use crate::cursor::Cursor;
use crate::order::{after_cursor, order_by};
use lorekeeper_core::{
    Entity, Error, Filter, OrderBy, PaginationSettings, ResourceKind, Result, SortDirection,
    QUERY_BEFORE, QUERY_CURSOR, QUERY_LIMIT, QUERY_SORT_BY, QUERY_SORT_ORDER,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A validated request for one page of a list
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub limit: usize,
    pub sort_field: String,
    pub direction: SortDirection,
    pub cursor: Option<Cursor>,
    /// Page towards the start of the list, ending just before `cursor`
    pub backward: bool,
}

/// What to ask the store for: the cursor restriction, the ordering and the
/// row count including the look-ahead row
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPlan {
    pub filter: Filter,
    pub order_by: Vec<OrderBy>,
    pub limit: usize,
}

impl FetchPlan {
    /// Combine the cursor restriction with an already composed query filter
    #[must_use]
    pub fn filter_with(&self, base: &Filter) -> Filter {
        base.clone().and(self.filter.clone())
    }
}

/// Pagination metadata returned alongside every list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next: bool,
    pub has_prev: bool,
    pub limit: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_cursor: Option<String>,
}

/// One page of a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    /// Transform the items while keeping the pagination metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

impl PageRequest {
    /// First page of a list
    #[must_use]
    pub fn first(limit: usize, sort_field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            limit,
            sort_field: sort_field.into(),
            direction,
            cursor: None,
            backward: false,
        }
    }

    /// Continue after `cursor`
    #[must_use]
    pub fn after(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self.backward = false;
        self
    }

    /// Page backwards, ending just before `cursor`
    #[must_use]
    pub fn before(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self.backward = true;
        self
    }

    /// Parse raw query parameters for a list of `kind`.
    ///
    /// Direction and sort field are validated before cursors are decoded, and
    /// all of it happens before the store is touched. Limits above the
    /// configured maximum are clamped; zero, negative or non-numeric limits
    /// are rejected.
    pub fn from_query(
        kind: ResourceKind,
        query: &Map<String, Value>,
        settings: &PaginationSettings,
    ) -> Result<Self> {
        let direction = match query.get(QUERY_SORT_ORDER) {
            None | Some(Value::Null) => settings.default_direction,
            Some(Value::String(raw)) => raw.parse()?,
            Some(other) => {
                return Err(Error::validation(
                    QUERY_SORT_ORDER,
                    format!("expected 'asc' or 'desc', got {other}"),
                ))
            }
        };

        let sort_field = match query.get(QUERY_SORT_BY) {
            None | Some(Value::Null) => settings.default_sort_field_for(kind).to_string(),
            Some(Value::String(field)) => field.clone(),
            Some(other) => {
                return Err(Error::validation(
                    QUERY_SORT_BY,
                    format!("expected a field name, got {other}"),
                ))
            }
        };
        if !kind.is_sortable_by(&sort_field) {
            return Err(Error::validation(
                QUERY_SORT_BY,
                format!(
                    "{kind} cannot be sorted by '{sort_field}'; expected one of {}",
                    kind.sortable_fields().join(", ")
                ),
            ));
        }

        let limit = parse_limit(query.get(QUERY_LIMIT), settings)?;

        let after = optional_token(query, QUERY_CURSOR)?;
        let before = optional_token(query, QUERY_BEFORE)?;

        let request = Self::first(limit, sort_field, direction);
        match (after, before) {
            (Some(_), Some(_)) => Err(Error::validation(
                QUERY_CURSOR,
                "cursor and before cannot be combined",
            )),
            (Some(token), None) => Ok(request.after(Cursor::decode(token)?)),
            (None, Some(token)) => Ok(request.before(Cursor::decode(token)?)),
            (None, None) => Ok(request),
        }
    }

    /// Direction the store should scan in
    #[must_use]
    pub fn scan_direction(&self) -> SortDirection {
        if self.backward {
            self.direction.reversed()
        } else {
            self.direction
        }
    }

    /// Build the store-level fragments for this request
    #[must_use]
    pub fn plan(&self) -> FetchPlan {
        let scan = self.scan_direction();
        let filter = self
            .cursor
            .as_ref()
            .map_or(Filter::True, |cursor| after_cursor(&self.sort_field, scan, cursor));
        FetchPlan {
            filter,
            order_by: order_by(&self.sort_field, scan),
            limit: self.limit.saturating_add(1),
        }
    }

    /// Turn the rows fetched for [`PageRequest::plan`] into a page.
    ///
    /// `rows` must be in scan order and may hold up to `limit + 1` rows; the
    /// extra row only signals that more rows exist and is never returned.
    #[must_use]
    pub fn assemble(&self, mut rows: Vec<Entity>) -> Page<Entity> {
        let has_more = rows.len() > self.limit;
        rows.truncate(self.limit);

        let (has_next, has_prev) = if self.backward {
            rows.reverse();
            (!rows.is_empty(), has_more)
        } else {
            (has_more, self.cursor.is_some())
        };

        let next_cursor = if has_next {
            rows.last()
                .map(|row| Cursor::from_entity(row, &self.sort_field).encode())
        } else {
            None
        };
        // An empty page after a cursor still leads back to where it started
        let prev_cursor = if has_prev {
            rows.first()
                .map(|row| Cursor::from_entity(row, &self.sort_field))
                .or_else(|| self.cursor.clone())
                .map(|cursor| cursor.encode())
        } else {
            None
        };

        Page {
            pagination: PageInfo {
                has_next,
                has_prev,
                limit: self.limit,
                next_cursor,
                prev_cursor,
            },
            items: rows,
        }
    }
}

fn optional_token<'a>(query: &'a Map<String, Value>, name: &str) -> Result<Option<&'a str>> {
    match query.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(token)) => Ok(Some(token.as_str())),
        Some(_) => Err(Error::validation(name, "must be a cursor string")),
    }
}

fn parse_limit(raw: Option<&Value>, settings: &PaginationSettings) -> Result<usize> {
    let requested = match raw {
        None | Some(Value::Null) => return Ok(settings.default_limit),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };
    match requested {
        Some(n) if n >= 1 => {
            let n = usize::try_from(n).unwrap_or(usize::MAX);
            Ok(n.min(settings.max_limit))
        }
        Some(n) => Err(Error::validation(
            QUERY_LIMIT,
            format!("must be at least 1, got {n}"),
        )),
        None => Err(Error::validation(QUERY_LIMIT, "must be an integer")),
    }
}
