//! # snaffler-powerbi
//!
//! Converts [Snaffler] file-share scan output into a flattened, schema-stable
//! JSON shape suitable for Power BI import, and merges many converted
//! documents into one consolidated file.
//!
//! Raw Snaffler output nests each finding's data inside a severity-keyed
//! wrapper object (`eventProperties.Red`, `eventProperties.Green`, …), which
//! tabular tools cannot pivot on. The converter flattens that wrapper into a
//! uniform `event` field carrying a `severity` marker next to the payload
//! fields.
//!
//! ## Quick start
//!
//! ```rust
//! use snaffler_powerbi::{config::Config, normalize};
//!
//! let config = Config::default();
//! let raw = serde_json::json!({
//!     "entries": [
//!         {"id": 1, "eventProperties": {"Green": {"DateTime": "2024-01-01", "Note": "ok"}}}
//!     ]
//! });
//!
//! let converted = normalize::transform_document(&raw, &config.fields, false);
//! assert_eq!(converted["entries"][0]["event"]["severity"], "Green");
//! ```
//!
//! ## Architecture
//!
//! The crate is organized around a pipeline:
//!
//! 1. **[`config`]** — load configuration from TOML files.
//! 2. **[`schema`]** — infer a lightweight path→observed-types schema from
//!    any JSON document (diagnostic aid for import mapping).
//! 3. **[`normalize`]** — flatten severity-bucket wrappers per entry and
//!    transform whole documents.
//! 4. **[`merge`]** — concatenate the entry sequences of several converted
//!    documents under a strict/lenient malformed-input policy.
//! 5. **[`pipeline`]** — orchestrate file discovery, conversion (in parallel
//!    via [rayon]), merging, and parity checking.
//! 6. **[`summary`]** — batch result types and pretty/JSON rendering.
//!
//! The core transforms ([`schema`], [`normalize`], [`merge`]) never touch
//! the filesystem; all I/O lives in [`files`] and [`pipeline`].
//!
//! [Snaffler]: https://github.com/SnaffCon/Snaffler

pub mod config;
pub mod error;
pub mod files;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod summary;
