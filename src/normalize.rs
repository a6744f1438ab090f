//! Entry normalization: severity-bucket flattening.
//!
//! Raw Snaffler entries carry their event data inside a wrapper object keyed
//! by severity level:
//!
//! ```json
//! {"id": 1, "eventProperties": {"Green": {"DateTime": "2024-01-01", "Note": "ok"}}}
//! ```
//!
//! [`normalize_entry`] replaces the wrapper with a uniform `event` field so
//! that every entry exposes the same columns:
//!
//! ```json
//! {"id": 1, "event": {"severity": "Green", "DateTime": "2024-01-01", "Note": "ok"}}
//! ```
//!
//! [`transform_document`] applies the per-entry normalization across a whole
//! document's `entries` sequence.

use crate::config::FieldsConfig;
use serde_json::{Map, Value};

/// Field name that holds a document's entry sequence.
pub const ENTRIES_FIELD: &str = "entries";

/// Field name produced by normalization.
pub const EVENT_FIELD: &str = "event";

/// Severity marker key inside the produced [`EVENT_FIELD`] object.
pub const SEVERITY_KEY: &str = "severity";

/// Normalizes one entry, flattening its severity-bucket wrapper.
///
/// Reads the wrapper field named by `fields.wrapper`; when it is present and
/// an object, the **first** `(severity, payload)` pair in its insertion
/// order is selected (in practice Snaffler populates at most one bucket per
/// entry). The result carries every input field except the wrapper — plus,
/// unless `keep_raw` is set, except any pre-existing legacy raw field —
/// and, when a bucket was selected, a new [`EVENT_FIELD`] object holding
/// `severity` followed by the payload's fields.
///
/// `severity` is written first and the payload's keys are applied after it,
/// so a payload key literally named `severity` overwrites the tag. That
/// tie-break matches the historical converter and is kept as-is.
///
/// With `keep_raw`, the original wrapper object is additionally retained
/// verbatim under the legacy raw field name (`fields.raw`).
///
/// A missing or non-object wrapper never raises — the entry's fields pass
/// through untouched and no event block is produced. The input is never
/// mutated.
pub fn normalize_entry(
    entry: &Map<String, Value>,
    fields: &FieldsConfig,
    keep_raw: bool,
) -> Map<String, Value> {
    let wrapper = entry.get(&fields.wrapper).and_then(Value::as_object);
    let bucket = wrapper.and_then(|w| w.iter().next());

    let mut normalized = Map::new();
    for (key, value) in entry {
        if key == &fields.wrapper {
            continue;
        }
        if !keep_raw && key == &fields.raw {
            continue;
        }
        normalized.insert(key.clone(), value.clone());
    }

    if let Some((severity, payload)) = bucket {
        let mut event = Map::new();
        event.insert(
            SEVERITY_KEY.to_string(),
            Value::String(severity.clone()),
        );
        if let Some(payload) = payload.as_object() {
            for (key, value) in payload {
                event.insert(key.clone(), value.clone());
            }
        }
        normalized.insert(EVENT_FIELD.to_string(), Value::Object(event));

        if keep_raw {
            // wrapper is Some here; bucket selection proved it.
            normalized.insert(
                fields.raw.clone(),
                Value::Object(wrapper.cloned().unwrap_or_default()),
            );
        }
    }

    normalized
}

/// Applies [`normalize_entry`] to every entry of a document.
///
/// A document that is not an object, or whose [`ENTRIES_FIELD`] is missing
/// or not an array, is returned unchanged — pass-through for non-matching
/// shapes is not an error. Otherwise the result contains exactly one field,
/// `entries`, with every object entry normalized and every non-object entry
/// carried over unchanged in place; any other top-level fields of the input
/// document are dropped.
///
/// The output entry count always equals the input entry count. Callers that
/// need the parity invariant enforced against I/O use
/// [`pipeline::convert_file`](crate::pipeline::convert_file), which checks
/// it after the transform.
pub fn transform_document(document: &Value, fields: &FieldsConfig, keep_raw: bool) -> Value {
    let Some(doc) = document.as_object() else {
        return document.clone();
    };
    let Some(entries) = doc.get(ENTRIES_FIELD).and_then(Value::as_array) else {
        return document.clone();
    };

    let transformed: Vec<Value> = entries
        .iter()
        .map(|entry| match entry.as_object() {
            Some(obj) => Value::Object(normalize_entry(obj, fields, keep_raw)),
            None => entry.clone(),
        })
        .collect();

    let mut out = Map::new();
    out.insert(ENTRIES_FIELD.to_string(), Value::Array(transformed));
    Value::Object(out)
}

/// Returns the entry count of a document, or `None` when the document does
/// not have a well-formed entries sequence.
pub fn entry_count(document: &Value) -> Option<usize> {
    document
        .as_object()
        .and_then(|doc| doc.get(ENTRIES_FIELD))
        .and_then(Value::as_array)
        .map(Vec::len)
}
