//! Ordering and cursor filter fragments

use crate::cursor::Cursor;
use lorekeeper_core::{Filter, OrderBy, SortDirection, FIELD_ID};

/// Store ordering for `sort_field`, with the primary key appended in the
/// same direction so the order is total.
#[must_use]
pub fn order_by(sort_field: &str, direction: SortDirection) -> Vec<OrderBy> {
    if sort_field == FIELD_ID {
        return vec![OrderBy::new(FIELD_ID, direction)];
    }
    vec![
        OrderBy::new(sort_field, direction),
        OrderBy::new(FIELD_ID, direction),
    ]
}

/// Filter selecting exactly the rows strictly after `cursor` in the
/// `(sort_field, id)` order:
///
/// `(sortField <op> lastValue) OR (sortField = lastValue AND id <op> lastId)`
#[must_use]
pub fn after_cursor(sort_field: &str, direction: SortDirection, cursor: &Cursor) -> Filter {
    let op = direction.after_op();
    if sort_field == FIELD_ID {
        return Filter::compare(FIELD_ID, op, cursor.last_id.clone());
    }
    Filter::any([
        Filter::compare(sort_field, op, cursor.last_value.clone()),
        Filter::all([
            Filter::equals(sort_field, cursor.last_value.clone()),
            Filter::compare(FIELD_ID, op, cursor.last_id.clone()),
        ]),
    ])
}
