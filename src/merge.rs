//! Merging converted documents.
//!
//! [`merge_documents`] concatenates the `entries` sequences of several
//! converted documents into a single consolidated document. Malformed input
//! is handled per the strict/lenient policy: strict aborts the whole merge
//! on the first schema violation, lenient skips the offending document or
//! entry and records the skip for the batch summary.

use crate::error::ShapeError;
use crate::normalize::ENTRIES_FIELD;
use crate::summary::Skip;
use serde_json::{Map, Value};

/// Entries accepted from one document, plus any lenient-mode skips.
#[derive(Debug, Default)]
pub struct Extraction {
    pub entries: Vec<Value>,
    pub skipped: Vec<Skip>,
}

/// Result of a completed merge.
#[derive(Debug)]
pub struct Merged {
    /// The consolidated document: a single `entries` field wrapping the
    /// concatenation.
    pub document: Value,
    /// Number of source documents that contributed entries.
    pub files_merged: usize,
    /// Total entries in the merged document.
    pub entries_merged: usize,
    /// Documents and entries rejected in lenient mode.
    pub skipped: Vec<Skip>,
}

/// Validates a document's shape and borrows its entries sequence.
///
/// Rejects documents whose top-level value is not an object, that lack the
/// `entries` key, or whose `entries` value is not a list. `source` names the
/// document in the error.
pub fn require_entries<'a>(document: &'a Value, source: &str) -> Result<&'a Vec<Value>, ShapeError> {
    let Some(doc) = document.as_object() else {
        return Err(ShapeError::NotAnObject {
            path: source.to_string(),
        });
    };
    let Some(entries) = doc.get(ENTRIES_FIELD) else {
        return Err(ShapeError::MissingEntries {
            path: source.to_string(),
        });
    };
    entries.as_array().ok_or(ShapeError::EntriesNotAList {
        path: source.to_string(),
    })
}

/// Extracts the object entries of one document under the strict/lenient
/// policy.
///
/// Strict mode returns the first [`ShapeError`] encountered. Lenient mode
/// degrades every violation to a [`Skip`]: a malformed document yields no
/// entries, a non-object element is dropped while the rest of the sequence
/// is kept.
pub fn extract_entries(
    document: &Value,
    source: &str,
    strict: bool,
) -> Result<Extraction, ShapeError> {
    let entries = match require_entries(document, source) {
        Ok(entries) => entries,
        Err(err) if strict => return Err(err),
        Err(err) => {
            return Ok(Extraction {
                entries: vec![],
                skipped: vec![Skip::document(source, &err)],
            });
        }
    };

    let mut extraction = Extraction::default();
    for (index, item) in entries.iter().enumerate() {
        if item.is_object() {
            extraction.entries.push(item.clone());
        } else {
            let err = ShapeError::EntryNotAnObject {
                path: source.to_string(),
                index,
            };
            if strict {
                return Err(err);
            }
            extraction.skipped.push(Skip::entry(source, &err));
        }
    }
    Ok(extraction)
}

/// Merges several `(source, document)` pairs into one document.
///
/// Sources are processed in lexicographic order of their identifier
/// regardless of the order given, so the merged entry sequence is
/// deterministic. Within one document the entry order is preserved.
pub fn merge_documents(documents: &[(String, Value)], strict: bool) -> Result<Merged, ShapeError> {
    let mut ordered: Vec<&(String, Value)> = documents.iter().collect();
    ordered.sort_by(|a, b| a.0.cmp(&b.0));

    let mut merged: Vec<Value> = Vec::new();
    let mut skipped: Vec<Skip> = Vec::new();
    let mut files_merged = 0usize;

    for (source, document) in ordered {
        let extraction = extract_entries(document, source, strict)?;
        let document_ok = extraction
            .skipped
            .iter()
            .all(|skip| !skip.is_whole_document());
        if document_ok {
            files_merged += 1;
        }
        merged.extend(extraction.entries);
        skipped.extend(extraction.skipped);
    }

    let entries_merged = merged.len();
    let mut out = Map::new();
    out.insert(ENTRIES_FIELD.to_string(), Value::Array(merged));

    Ok(Merged {
        document: Value::Object(out),
        files_merged,
        entries_merged,
        skipped,
    })
}
