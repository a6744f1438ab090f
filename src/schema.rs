//! Lightweight JSON schema discovery.
//!
//! [`walk`] visits every value reachable from a document root and records,
//! for each structural path, the set of primitive/composite types observed
//! there. The result is not a JSON Schema document — no constraints, no
//! required fields — just a path→types map, which is enough to sanity-check
//! a Power BI import mapping against real scan output.
//!
//! # Path syntax
//!
//! Object members join with `.`; array traversal appends a literal `[]`.
//! Array elements are not indexed individually — every element of an array
//! shares one path. The document root is the empty string.
//!
//! ```text
//! ""                          object
//! "entries"                   array
//! "entries[]"                 object
//! "entries[].eventProperties" object
//! "entries[].level"           string
//! ```

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from structural path to the set of type tags observed there.
///
/// BTree containers keep both the paths and the tag sets sorted, so
/// serializing a `SchemaMap` for the same input always produces identical
/// bytes.
pub type SchemaMap = BTreeMap<String, BTreeSet<&'static str>>;

/// Returns the type tag for a single JSON value.
///
/// Tags are one of `null`, `boolean`, `integer`, `number`, `string`,
/// `array`, `object`. A number is `integer` when it is representable as
/// `i64` or `u64`, `number` otherwise.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Walks a JSON value and collects its path→types schema.
///
/// The walk is total over the JSON domain — there are no error conditions —
/// and pure: the input is never modified and identical inputs always yield
/// identical maps.
///
/// # Examples
///
/// ```
/// use snaffler_powerbi::schema::walk;
///
/// let doc = serde_json::json!({"entries": [{"id": 1}, {"id": "x"}]});
/// let schema = walk(&doc);
///
/// assert!(schema[""].contains("object"));
/// assert!(schema["entries[]"].contains("object"));
/// let id_tags: Vec<_> = schema["entries[].id"].iter().copied().collect();
/// assert_eq!(id_tags, vec!["integer", "string"]);
/// ```
pub fn walk(value: &Value) -> SchemaMap {
    let mut found = SchemaMap::new();
    walk_into(value, "", &mut found);
    found
}

fn walk_into(node: &Value, path: &str, found: &mut SchemaMap) {
    found
        .entry(path.to_string())
        .or_default()
        .insert(type_name(node));

    match node {
        Value::Object(members) => {
            for (key, value) in members {
                let next_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                walk_into(value, &next_path, found);
            }
        }
        Value::Array(items) => {
            let next_path = format!("{path}[]");
            for item in items {
                walk_into(item, &next_path, found);
            }
        }
        _ => {}
    }
}
