//! kicad-bom - bill of materials generator for KiCad projects.
//!
//! Reads the schematic XML export and the `.kicad_pcb` layout of a project,
//! merges pad and placement data into the schematic components, groups
//! identical parts and writes the result as a CSV file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

mod bom;
mod commands;
mod error;
mod export;
mod kicad;
mod project;

#[derive(Parser)]
#[command(name = "kicad-bom")]
#[command(author, version, about = "Bill of materials generator for KiCad projects")]
struct Cli {
    /// Project directory with one .xml schematic export and one .kicad_pcb layout
    project_dir: PathBuf,

    /// Only keep physical components (those with a Name field)
    #[arg(short, long)]
    physical_only: bool,

    /// Output CSV file (default: <schematic export>.csv in the project directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field delimiter (single ASCII character)
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Add Footprint-lib and Footprint-part columns
    #[arg(long)]
    split_footprint: bool,

    /// Print the BOM as a table after writing it
    #[arg(long)]
    preview: bool,

    /// Print the BOM as JSON instead of the progress report
    #[arg(long, conflicts_with = "preview")]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii_punctuation() && *b != b'"' => Ok(*b),
        _ if s == "\\t" => Ok(b'\t'),
        _ => Err(format!(
            "delimiter must be a single ASCII punctuation character or \\t, got {:?}",
            s
        )),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = commands::bom::BomOptions {
        physical_only: cli.physical_only,
        split_footprint: cli.split_footprint,
        output: cli.output,
        delimiter: cli.delimiter,
        preview: cli.preview,
        json: cli.json,
        ..Default::default()
    };

    commands::bom::execute(&cli.project_dir, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("x").is_err());
        assert!(parse_delimiter("\"").is_err());
        assert!(parse_delimiter("é").is_err());
        assert!(parse_delimiter("\n").is_err());
        assert!(parse_delimiter("\r").is_err());
        assert!(parse_delimiter(" ").is_err());
    }
}
