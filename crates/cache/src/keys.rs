//! Cache key generation for list queries

use lorekeeper_core::ResourceKind;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Render `value` as JSON with every object's keys sorted, at every depth.
///
/// Two queries that differ only in parameter order render identically.
#[must_use]
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // Serialising a plain string cannot fail
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Hex SHA-256 of the canonical rendering of `query`
#[must_use]
pub fn query_hash(query: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_json(query).as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Key under which one anonymous list page of `kind` is cached
#[must_use]
pub fn list_key(kind: ResourceKind, query: &Value) -> String {
    format!("{}:{}", kind.list_prefix(), query_hash(query))
}
