//! Configuration loading and management.
//!
//! Provides types for the TOML-based configuration file. The default
//! configuration file is `snaffler-powerbi.toml` in the current working
//! directory. Use [`Config::load`] to read it:
//!
//! ```rust,no_run
//! use snaffler_powerbi::config::Config;
//!
//! let config = Config::load(None).expect("failed to load config");
//! assert_eq!(config.fields.wrapper, "eventProperties");
//! ```
//!
//! All fields carry defaults matching the historical converter, so the
//! config file can be omitted entirely. CLI flags override loaded values.

use std::path::{Path, PathBuf};

/// Main configuration for the converter.
///
/// Loaded from a TOML file (typically `snaffler-powerbi.toml`).
///
/// # Examples
///
/// ```toml
/// [fields]
/// wrapper = "eventProperties"
/// raw = "rawEventProperties"
///
/// [convert]
/// keep_raw = true
///
/// [merge]
/// input_dir = "./converted"
/// strict = true
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    /// Field names the normalizer reads and writes.
    pub fields: FieldsConfig,
    /// Defaults for `convert` and `convert-all`.
    pub convert: ConvertConfig,
    /// Defaults for `merge`.
    pub merge: MergeConfig,
}

/// Field names the normalizer operates on.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct FieldsConfig {
    /// Entry field holding the severity-keyed wrapper object.
    pub wrapper: String,
    /// Legacy field that retains the original wrapper when `keep_raw` is set.
    pub raw: String,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        FieldsConfig {
            wrapper: "eventProperties".to_string(),
            raw: "rawEventProperties".to_string(),
        }
    }
}

/// Conversion defaults.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Retain the original wrapper object under the legacy raw field.
    /// Power BI imports can drop the raw column, but keeping it inflates
    /// the output, so the default is off.
    pub keep_raw: bool,
    /// Pretty-print output documents (2-space indentation).
    pub pretty: bool,
    /// Abort the batch when a document does not have the expected shape
    /// instead of passing it through unchanged.
    pub strict: bool,
}

/// Merge defaults, matching the historical converter's argument defaults.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Directory containing converted JSON files.
    pub input_dir: PathBuf,
    /// Glob pattern matched against file names within the input directory.
    pub pattern: String,
    /// Consolidated output file path.
    pub output: PathBuf,
    /// Pretty-print the merged document.
    pub pretty: bool,
    /// Fail fast on any malformed document or entry instead of skipping.
    pub strict: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            input_dir: PathBuf::from("./converted"),
            pattern: "*.json".to_string(),
            output: PathBuf::from("SnafflerMerged.merged.json"),
            pretty: false,
            strict: false,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. If `path` is `None`, try `snaffler-powerbi.toml` in the current directory.
    /// 3. If that file does not exist either, return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// Returns `Err(String)` when:
    /// - The explicit path does not exist.
    /// - The file cannot be read from disk.
    /// - The TOML content fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Config, String> {
        let config_path = if let Some(p) = path {
            if p.exists() {
                Some(p.to_path_buf())
            } else {
                return Err(format!("Config file not found: {}", p.display()));
            }
        } else {
            let default_path = Path::new("snaffler-powerbi.toml");
            if default_path.exists() {
                Some(default_path.to_path_buf())
            } else {
                None
            }
        };

        match config_path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
                let config: Config = toml::from_str(&content)
                    .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))?;
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }
}
