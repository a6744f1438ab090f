//! Batch result types and their pretty/JSON rendering.

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;

/// Output formats for batch summaries.
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable colored text.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

/// One document or entry rejected during a lenient batch operation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Skip {
    /// Source file or document identifier.
    pub source: String,
    /// Human-readable rejection reason.
    pub reason: String,
    /// Whether the whole document or a single entry was rejected.
    pub scope: SkipScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipScope {
    Document,
    Entry,
}

impl Skip {
    pub fn document(source: &str, reason: &impl fmt::Display) -> Self {
        Skip {
            source: source.to_string(),
            reason: reason.to_string(),
            scope: SkipScope::Document,
        }
    }

    pub fn entry(source: &str, reason: &impl fmt::Display) -> Self {
        Skip {
            source: source.to_string(),
            reason: reason.to_string(),
            scope: SkipScope::Entry,
        }
    }

    pub fn is_whole_document(&self) -> bool {
        self.scope == SkipScope::Document
    }
}

/// One successfully converted file.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Entries in the converted document; 0 for pass-through shapes.
    pub entries: usize,
}

/// Result of a batch conversion run.
#[derive(Debug, serde::Serialize)]
pub struct ConvertSummary {
    pub timestamp: String,
    pub converted: usize,
    pub skipped: usize,
    pub entries: usize,
    pub files: Vec<ConvertedFile>,
    pub skips: Vec<Skip>,
}

impl ConvertSummary {
    pub fn new(files: Vec<ConvertedFile>, skips: Vec<Skip>) -> Self {
        ConvertSummary {
            timestamp: chrono::Utc::now().to_rfc3339(),
            converted: files.len(),
            skipped: skips.len(),
            entries: files.iter().map(|f| f.entries).sum(),
            files,
            skips,
        }
    }
}

/// Result of a merge run.
#[derive(Debug, serde::Serialize)]
pub struct MergeSummary {
    pub timestamp: String,
    pub output: PathBuf,
    pub files_merged: usize,
    pub entries_merged: usize,
    pub skipped: usize,
    pub skips: Vec<Skip>,
}

impl MergeSummary {
    pub fn new(output: PathBuf, files_merged: usize, entries_merged: usize, skips: Vec<Skip>) -> Self {
        MergeSummary {
            timestamp: chrono::Utc::now().to_rfc3339(),
            output,
            files_merged,
            entries_merged,
            skipped: skips.len(),
            skips,
        }
    }
}

/// Formats a [`ConvertSummary`] in the requested [`SummaryFormat`].
///
/// # Panics
///
/// Panics if the summary cannot be serialized (should not happen with valid data).
pub fn format_convert_summary(summary: &ConvertSummary, format: &SummaryFormat) -> String {
    match format {
        SummaryFormat::Json => {
            let mut out =
                serde_json::to_string_pretty(summary).expect("JSON serialization failed");
            out.push('\n');
            out
        }
        SummaryFormat::Pretty => {
            let mut out = String::new();
            let separator = "─".repeat(54);

            out.push_str(&format!("{}\n", "Conversion Summary".bold().underline()));
            out.push_str(&format!("{}\n", separator.dimmed()));

            for file in &summary.files {
                out.push_str(&format!(
                    "  {}   {:<28} {} entries -> {}\n",
                    "[OK]".green().bold(),
                    file.input.display(),
                    file.entries,
                    file.output.display(),
                ));
            }
            push_skips(&mut out, &summary.skips);

            out.push_str(&format!("{}\n", separator.dimmed()));
            out.push_str(&format!(
                "Result: {}, {}, {} entries\n",
                format!("{} converted", summary.converted).green().bold(),
                format!("{} skipped", summary.skipped).yellow().bold(),
                summary.entries,
            ));
            out
        }
    }
}

/// Formats a [`MergeSummary`] in the requested [`SummaryFormat`].
///
/// # Panics
///
/// Panics if the summary cannot be serialized (should not happen with valid data).
pub fn format_merge_summary(summary: &MergeSummary, format: &SummaryFormat) -> String {
    match format {
        SummaryFormat::Json => {
            let mut out =
                serde_json::to_string_pretty(summary).expect("JSON serialization failed");
            out.push('\n');
            out
        }
        SummaryFormat::Pretty => {
            let mut out = String::new();
            let separator = "─".repeat(54);

            out.push_str(&format!("{}\n", "Merge Summary".bold().underline()));
            out.push_str(&format!("{}\n", separator.dimmed()));
            push_skips(&mut out, &summary.skips);
            out.push_str(&format!(
                "  {}   Wrote {} merged entries from {} files to {}\n",
                "[OK]".green().bold(),
                summary.entries_merged,
                summary.files_merged,
                summary.output.display(),
            ));
            out.push_str(&format!("{}\n", separator.dimmed()));
            out.push_str(&format!(
                "Result: {}, {}\n",
                format!("{} merged", summary.files_merged).green().bold(),
                format!("{} skipped", summary.skipped).yellow().bold(),
            ));
            out
        }
    }
}

fn push_skips(out: &mut String, skips: &[Skip]) {
    for skip in skips {
        out.push_str(&format!(
            "  {} {:<28} {}\n",
            "[WARN]".yellow().bold(),
            skip.source,
            skip.reason.dimmed(),
        ));
    }
}
