use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Print the JSON schema of the sketchpad config file.
#[derive(Parser, Debug)]
#[command(name = "sketchpad-config-schema")]
struct Args {
    /// Write the schema to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let schema = serde_json::to_string_pretty(&sketchpad::Config::json_schema())?;

    match args.output {
        Some(path) => std::fs::write(&path, schema + "\n")
            .with_context(|| format!("Failed to write schema to {}", path.display()))?,
        None => println!("{schema}"),
    }
    Ok(())
}
