//! BOM command - build a grouped bill of materials from a KiCad project.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::bom::{
    deduplicate, merge_components, retain_physical, split_footprints, ComponentRecord,
    IGNORED_FIELDS,
};
use crate::export::{render_table, write_csv, ColumnLayout};
use crate::kicad::{extract_components, extract_placements};
use crate::project::{discover, ProjectFiles};

/// Options for BOM generation.
#[derive(Debug, Clone)]
pub struct BomOptions {
    /// Drop components without a `Name` field
    pub physical_only: bool,
    /// Add `Footprint-lib` / `Footprint-part` columns
    pub split_footprint: bool,
    /// Output path (default: next to the schematic export)
    pub output: Option<PathBuf>,
    /// Field delimiter byte
    pub delimiter: u8,
    /// Output column order
    pub layout: ColumnLayout,
    /// Print the BOM as a table after writing
    pub preview: bool,
    /// Print the BOM as JSON instead of the progress report
    pub json: bool,
}

impl Default for BomOptions {
    fn default() -> Self {
        Self {
            physical_only: false,
            split_footprint: false,
            output: None,
            delimiter: b',',
            layout: ColumnLayout::default(),
            preview: false,
            json: false,
        }
    }
}

/// Counts collected while building the BOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomStats {
    /// Components in the schematic export
    pub components: usize,
    /// Footprints found on the layout
    pub footprints: usize,
    /// Components removed by the physical-only filter
    pub removed: usize,
    /// BOM lines after grouping
    pub unique: usize,
}

/// JSON output for the BOM command.
#[derive(Serialize)]
struct BomJson<'a> {
    output: String,
    stats: &'a BomStats,
    lines: &'a [ComponentRecord],
}

/// Run the pipeline on already located project files.
pub fn build_bom(
    files: &ProjectFiles,
    options: &BomOptions,
) -> Result<(Vec<ComponentRecord>, BomStats)> {
    let components = extract_components(&files.schematic)?;
    let placements = extract_placements(&files.layout)?;
    info!(
        components = components.len(),
        footprints = placements.len(),
        "extracted project data"
    );

    let mut stats = BomStats {
        components: components.len(),
        footprints: placements.len(),
        removed: 0,
        unique: 0,
    };

    let mut merged = merge_components(components, &placements)?;

    if options.physical_only {
        let (kept, removed) = retain_physical(merged);
        info!(removed, "filtered placeholder components");
        merged = kept;
        stats.removed = removed;
    }

    let mut lines = deduplicate(merged, &IGNORED_FIELDS);

    if options.split_footprint {
        split_footprints(&mut lines);
    }

    stats.unique = lines.len();
    Ok((lines, stats))
}

/// Execute the BOM command.
pub fn execute(project_dir: &Path, options: &BomOptions) -> Result<()> {
    let files = discover(project_dir)?;
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| files.default_output());

    let (lines, stats) = build_bom(&files, options)?;

    write_csv(&lines, &options.layout, options.delimiter, &output)?;

    if options.json {
        let json = BomJson {
            output: output.display().to_string(),
            stats: &stats,
            lines: &lines,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&json).context("Failed to serialize BOM")?
        );
        return Ok(());
    }

    print_report(&files, &stats, &output);

    if options.preview && !lines.is_empty() {
        println!("\n{}", render_table(&lines, &options.layout));
    }

    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_report(files: &ProjectFiles, stats: &BomStats, output: &Path) {
    println!(
        "{} Read {} components from {}",
        "✓".green().bold(),
        stats.components,
        file_name(&files.schematic).cyan()
    );
    println!(
        "{} Read {} footprints from {}",
        "✓".green().bold(),
        stats.footprints,
        file_name(&files.layout).cyan()
    );

    if stats.removed > 0 {
        println!(
            "{} Removed {} components without a Name field",
            "!".yellow(),
            stats.removed
        );
    }

    println!(
        "{} Exported {} unique components to {}",
        "✓".green().bold(),
        stats.unique,
        output.display().to_string().cyan()
    );
}
