use clap::{Parser, Subcommand};
use snaffler_powerbi::summary::SummaryFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "snaffler-powerbi",
    version,
    about = "Convert and merge Snaffler scan output for Power BI import"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one raw Snaffler document into the Power BI-friendly shape
    Convert {
        /// Path to the raw JSON document
        input: PathBuf,

        /// Output path (default: input with a .powerbi.json extension)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Also write the inferred path->types schema to this file
        #[arg(long)]
        schema_out: Option<PathBuf>,

        /// Keep the original wrapper object under the legacy raw field
        #[arg(long)]
        keep_raw: bool,

        /// Pretty-print the output JSON (2-space indent)
        #[arg(long)]
        pretty: bool,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Convert every matching document under a directory
    #[command(name = "convert-all")]
    ConvertAll {
        /// Directory containing raw JSON documents
        input_dir: PathBuf,

        /// Glob pattern matched against file names
        #[arg(long, default_value = "*.json")]
        pattern: String,

        /// Write converted files into this directory instead of next to the inputs
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Keep the original wrapper object under the legacy raw field
        #[arg(long)]
        keep_raw: bool,

        /// Pretty-print the output JSON (2-space indent)
        #[arg(long)]
        pretty: bool,

        /// Fail fast on documents without the expected shape instead of passing them through
        #[arg(long)]
        strict: bool,

        /// Summary format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: SummaryFormat,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Merge converted documents into one consolidated file
    Merge {
        /// Directory containing converted JSON files (default: ./converted)
        #[arg(long)]
        input_dir: Option<PathBuf>,

        /// Glob pattern matched against file names (default: *.json)
        #[arg(long)]
        pattern: Option<String>,

        /// Output file path (default: SnafflerMerged.merged.json)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Pretty-print the merged document
        #[arg(long)]
        pretty: bool,

        /// Fail fast if any file is missing/invalid schema instead of skipping
        #[arg(long)]
        strict: bool,

        /// Summary format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: SummaryFormat,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the inferred path->types schema of a document
    Schema {
        /// Path to the JSON document
        input: PathBuf,

        /// Write the schema to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}
