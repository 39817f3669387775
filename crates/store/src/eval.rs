//! Evaluation of the filter language over in-memory entities
//!
//! Values are compared under a single total order: `null` first, then
//! booleans, numbers (numerically), strings (lexically), arrays and objects.
//! Sorting and the range comparisons in filters use the same order, which is
//! what keeps cursor pages consistent with the sort.

use lorekeeper_core::{ComparisonOp, Entity, Filter, OrderBy, SortDirection};
use serde_json::Value;
use std::cmp::Ordering;

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (l, r) in x.iter().zip(y) {
                let ord = compare_values(l, r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(_), Value::Object(_)) => a.to_string().cmp(&b.to_string()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn field_or_null(entity: &Entity, field: &str) -> Value {
    entity.field(field).unwrap_or(Value::Null)
}

/// Whether `entity` satisfies `filter`. A missing field reads as `null`.
#[must_use]
pub fn matches(filter: &Filter, entity: &Entity) -> bool {
    match filter {
        Filter::True => true,
        Filter::All(parts) => parts.iter().all(|part| matches(part, entity)),
        Filter::Any(parts) => parts.iter().any(|part| matches(part, entity)),
        Filter::Not(inner) => !matches(inner, entity),
        Filter::Compare { field, op, value } => {
            let ord = compare_values(&field_or_null(entity, field), value);
            match op {
                ComparisonOp::Eq => ord == Ordering::Equal,
                ComparisonOp::Ne => ord != Ordering::Equal,
                ComparisonOp::Lt => ord == Ordering::Less,
                ComparisonOp::Lte => ord != Ordering::Greater,
                ComparisonOp::Gt => ord == Ordering::Greater,
                ComparisonOp::Gte => ord != Ordering::Less,
            }
        }
    }
}

/// Compare two entities under a multi-key ordering
#[must_use]
pub fn compare_entities(a: &Entity, b: &Entity, order_by: &[OrderBy]) -> Ordering {
    for key in order_by {
        let ord = compare_values(&field_or_null(a, &key.field), &field_or_null(b, &key.field));
        let ord = match key.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Sort `entities` in place under `order_by`
pub fn sort_entities(entities: &mut [Entity], order_by: &[OrderBy]) {
    entities.sort_by(|a, b| compare_entities(a, b, order_by));
}
