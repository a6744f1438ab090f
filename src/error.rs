use std::path::PathBuf;

/// Schema violations detected while transforming or merging documents.
///
/// Whether a violation aborts the operation or only skips the offending
/// document/entry depends on the strict/lenient policy of the caller; a
/// [`ParityViolation`](ShapeError::ParityViolation) aborts unconditionally.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("top-level JSON is not an object in {path}")]
    NotAnObject { path: String },

    #[error("missing 'entries' key in {path}")]
    MissingEntries { path: String },

    #[error("'entries' is not a list in {path}")]
    EntriesNotAList { path: String },

    #[error("entries[{index}] is not an object in {path}")]
    EntryNotAnObject { path: String, index: usize },

    #[error("entry count changed during transform: {before} -> {after} in {path}")]
    ParityViolation {
        path: String,
        before: usize,
        after: usize,
    },

    #[error("no files matched {pattern} in {}", .dir.display())]
    NoFilesMatched { dir: PathBuf, pattern: String },
}

/// Filesystem and parse failures, each carrying the offending path.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid file pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
}

/// Top-level error type for the convert/merge pipelines.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    File(#[from] FileError),
}
