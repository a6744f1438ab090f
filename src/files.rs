//! Filesystem collaborators: file discovery, JSON reading, JSON writing.
//!
//! The transform core ([`schema`](crate::schema), [`normalize`](crate::normalize),
//! [`merge`](crate::merge)) operates purely on in-memory values; everything
//! that touches the disk lives here.

use crate::error::FileError;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collects files under `dir` whose file name matches `pattern`.
///
/// `pattern` is a glob matched against the file name only (not the full
/// path), e.g. `*.json` or `share-*.json`. Results are sorted
/// lexicographically so downstream processing order is deterministic.
///
/// # Errors
///
/// Returns [`FileError::Pattern`] when the glob pattern is invalid.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use snaffler_powerbi::files::collect_files;
///
/// let converted = collect_files(Path::new("./converted"), "*.json")?;
/// # Ok::<(), snaffler_powerbi::error::FileError>(())
/// ```
pub fn collect_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, FileError> {
    let matcher = glob::Pattern::new(pattern).map_err(|source| FileError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| {
            p.file_name()
                .map(|name| matcher.matches(&name.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Reads and parses one UTF-8 JSON file.
pub fn load_json(path: &Path) -> Result<Value, FileError> {
    let content = std::fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| FileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes `value` to `path`, creating parent directories as needed.
///
/// `pretty` selects 2-space indentation; otherwise the output is compact
/// (`,`/`:` separators). Non-ASCII characters are written unescaped and the
/// file always ends with a newline.
///
/// # Panics
///
/// Panics if `value` cannot be serialized (should not happen for JSON values).
pub fn write_json<T: serde::Serialize>(
    path: &Path,
    value: &T,
    pretty: bool,
) -> Result<(), FileError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| FileError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let mut text = if pretty {
        serde_json::to_string_pretty(value).expect("JSON serialization failed")
    } else {
        serde_json::to_string(value).expect("JSON serialization failed")
    };
    text.push('\n');

    std::fs::write(path, text).map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
    })
}
