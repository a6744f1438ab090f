//! Convert/merge orchestration over files.
//!
//! [`convert_file`] is the single-document entry point: load, optionally dump
//! the inferred schema, normalize, check entry-count parity, write.
//! [`convert_dir`] runs it across every matching file in a directory **in
//! parallel** via [rayon]; per-file transforms share no state, and the file
//! list is sorted before the parallel map so results and summaries keep a
//! deterministic order. [`merge_dir`] drives [`merge`](crate::merge) over a
//! directory of converted documents.
//!
//! Failure policy (batch operations): read/parse/write failures skip the
//! offending file and continue; schema violations abort only in strict mode;
//! a parity violation always aborts — it indicates a normalization bug, not
//! bad input.

use crate::config::Config;
use crate::error::{PipelineError, ShapeError};
use crate::files;
use crate::merge;
use crate::normalize::{self, entry_count};
use crate::schema::{self, SchemaMap};
use crate::summary::{ConvertedFile, ConvertSummary, MergeSummary, Skip};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Derives the default output path for a converted document:
/// `snaffledShares.json` → `snaffledShares.powerbi.json`.
pub fn powerbi_output_path(input: &Path) -> PathBuf {
    input.with_extension("powerbi.json")
}

/// Converts one raw document file.
///
/// Steps:
/// 1. Load and parse `input`.
/// 2. When `schema_out` is given, walk the raw document and write its
///    path→types schema there (pretty-printed).
/// 3. Apply the document transform with the configured field names.
/// 4. Verify entry-count parity between input and output — a mismatch is
///    always fatal.
/// 5. Write the converted document to `output`.
///
/// With `convert.strict` enabled in the config, a document that does not
/// have the expected shape is an error; otherwise it passes through
/// unchanged (reported with an entry count of 0).
pub fn convert_file(
    input: &Path,
    output: &Path,
    schema_out: Option<&Path>,
    config: &Config,
) -> Result<ConvertedFile, PipelineError> {
    let source = input.display().to_string();
    let document = files::load_json(input)?;

    if config.convert.strict {
        merge::require_entries(&document, &source)?;
    }

    if let Some(schema_path) = schema_out {
        let schema = schema::walk(&document);
        files::write_json(schema_path, &schema, true)?;
    }

    let before = entry_count(&document);
    let converted =
        normalize::transform_document(&document, &config.fields, config.convert.keep_raw);
    let after = entry_count(&converted);

    if let Some(before) = before {
        if after != Some(before) {
            return Err(ShapeError::ParityViolation {
                path: source,
                before,
                after: after.unwrap_or(0),
            }
            .into());
        }
    }

    files::write_json(output, &converted, config.convert.pretty)?;

    Ok(ConvertedFile {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        entries: after.unwrap_or(0),
    })
}

/// Converts every file under `input_dir` whose name matches `pattern`.
///
/// Output paths are derived per file ([`powerbi_output_path`]); `out_dir`
/// relocates them into one directory while keeping the derived names.
/// Files that cannot be read, parsed, or written are skipped with a
/// warning in the summary; shape violations (strict mode) and parity
/// violations abort the batch.
pub fn convert_dir(
    input_dir: &Path,
    pattern: &str,
    out_dir: Option<&Path>,
    config: &Config,
) -> Result<ConvertSummary, PipelineError> {
    let inputs = files::collect_files(input_dir, pattern)?;

    if inputs.is_empty() {
        let err = ShapeError::NoFilesMatched {
            dir: input_dir.to_path_buf(),
            pattern: pattern.to_string(),
        };
        if config.convert.strict {
            return Err(err.into());
        }
        let source = input_dir.display().to_string();
        return Ok(ConvertSummary::new(vec![], vec![Skip::document(&source, &err)]));
    }

    let results: Vec<(PathBuf, Result<ConvertedFile, PipelineError>)> = inputs
        .par_iter()
        .map(|input| {
            let derived = powerbi_output_path(input);
            let output = match out_dir {
                Some(dir) => match derived.file_name() {
                    Some(name) => dir.join(name),
                    None => derived.clone(),
                },
                None => derived,
            };
            (input.clone(), convert_file(input, &output, None, config))
        })
        .collect();

    let mut converted = Vec::new();
    let mut skips = Vec::new();
    for (input, result) in results {
        match result {
            Ok(file) => converted.push(file),
            Err(PipelineError::File(err)) => {
                skips.push(Skip::document(&input.display().to_string(), &err));
            }
            Err(fatal) => return Err(fatal),
        }
    }

    Ok(ConvertSummary::new(converted, skips))
}

/// Merges every converted document under `config.merge.input_dir` into
/// `config.merge.output`.
///
/// Files that cannot be read or parsed are skipped regardless of mode;
/// schema violations follow the strict/lenient policy of
/// [`merge::merge_documents`]. When no files match the pattern, lenient
/// mode writes an empty `entries` document after a warning and strict mode
/// errors out.
pub fn merge_dir(config: &Config) -> Result<MergeSummary, PipelineError> {
    let merge_config = &config.merge;
    let inputs = files::collect_files(&merge_config.input_dir, &merge_config.pattern)?;

    let mut skips: Vec<Skip> = Vec::new();
    if inputs.is_empty() {
        let err = ShapeError::NoFilesMatched {
            dir: merge_config.input_dir.to_path_buf(),
            pattern: merge_config.pattern.clone(),
        };
        if merge_config.strict {
            return Err(err.into());
        }
        skips.push(Skip::document(
            &merge_config.input_dir.display().to_string(),
            &err,
        ));
    }

    let mut documents: Vec<(String, serde_json::Value)> = Vec::new();
    for input in &inputs {
        match files::load_json(input) {
            Ok(document) => documents.push((input.display().to_string(), document)),
            Err(err) => skips.push(Skip::document(&input.display().to_string(), &err)),
        }
    }

    let merged = merge::merge_documents(&documents, merge_config.strict)?;
    files::write_json(&merge_config.output, &merged.document, merge_config.pretty)?;

    skips.extend(merged.skipped);
    Ok(MergeSummary::new(
        merge_config.output.clone(),
        merged.files_merged,
        merged.entries_merged,
        skips,
    ))
}

/// Loads a document and returns its path→types schema.
pub fn document_schema(input: &Path) -> Result<SchemaMap, PipelineError> {
    let document = files::load_json(input)?;
    Ok(schema::walk(&document))
}
