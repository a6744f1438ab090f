mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use snaffler_powerbi::{config, files, pipeline, summary};
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            schema_out,
            keep_raw,
            pretty,
            config: config_path,
        } => {
            if !input.exists() {
                eprintln!("Error: input does not exist: {}", input.display());
                std::process::exit(2);
            }

            let mut config = load_config(config_path);
            if keep_raw {
                config.convert.keep_raw = true;
            }
            if pretty {
                config.convert.pretty = true;
            }

            let output = output.unwrap_or_else(|| pipeline::powerbi_output_path(&input));

            match pipeline::convert_file(&input, &output, schema_out.as_deref(), &config) {
                Ok(file) => {
                    eprintln!(
                        "Wrote {} entries to {}",
                        file.entries,
                        file.output.display()
                    );
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::ConvertAll {
            input_dir,
            pattern,
            out_dir,
            keep_raw,
            pretty,
            strict,
            format,
            config: config_path,
        } => {
            if !input_dir.is_dir() {
                eprintln!(
                    "Error: input-dir does not exist or is not a directory: {}",
                    input_dir.display()
                );
                std::process::exit(2);
            }

            let mut config = load_config(config_path);
            if keep_raw {
                config.convert.keep_raw = true;
            }
            if pretty {
                config.convert.pretty = true;
            }
            if strict {
                config.convert.strict = true;
            }

            match pipeline::convert_dir(&input_dir, &pattern, out_dir.as_deref(), &config) {
                Ok(summary) => {
                    print!("{}", summary::format_convert_summary(&summary, &format));
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Merge {
            input_dir,
            pattern,
            output,
            pretty,
            strict,
            format,
            config: config_path,
        } => {
            let mut config = load_config(config_path);
            if let Some(input_dir) = input_dir {
                config.merge.input_dir = input_dir;
            }
            if let Some(pattern) = pattern {
                config.merge.pattern = pattern;
            }
            if let Some(output) = output {
                config.merge.output = output;
            }
            if pretty {
                config.merge.pretty = true;
            }
            if strict {
                config.merge.strict = true;
            }

            if !config.merge.input_dir.is_dir() {
                eprintln!(
                    "Error: input-dir does not exist or is not a directory: {}",
                    config.merge.input_dir.display()
                );
                std::process::exit(2);
            }

            match pipeline::merge_dir(&config) {
                Ok(summary) => {
                    print!("{}", summary::format_merge_summary(&summary, &format));
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Schema { input, output } => {
            if !input.exists() {
                eprintln!("Error: input does not exist: {}", input.display());
                std::process::exit(2);
            }

            let schema = match pipeline::document_schema(&input) {
                Ok(schema) => schema,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };

            match output {
                Some(path) => {
                    if let Err(e) = files::write_json(&path, &schema, true) {
                        eprintln!("Error: {e}");
                        std::process::exit(1);
                    }
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    let text = serde_json::to_string_pretty(&schema)
                        .expect("JSON serialization failed");
                    println!("{text}");
                }
            }
        }
    }
}

fn load_config(path: Option<PathBuf>) -> config::Config {
    config::Config::load(path.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    })
}
