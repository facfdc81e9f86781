//! Locating the schematic export and layout inside a KiCad project directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BomError, Result};

/// Input files of one KiCad project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFiles {
    /// Schematic XML export (`*.xml`)
    pub schematic: PathBuf,
    /// PCB layout (`*.kicad_pcb`)
    pub layout: PathBuf,
}

impl ProjectFiles {
    /// Default output path: the schematic export with a `.csv` extension.
    pub fn default_output(&self) -> PathBuf {
        self.schematic.with_extension("csv")
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Find exactly one `.xml` and one `.kicad_pcb` file directly inside `dir`.
pub fn discover(dir: &Path) -> Result<ProjectFiles> {
    if !dir.is_dir() {
        return Err(BomError::input_not_found(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        BomError::input_not_found(format!("cannot read {}: {}", dir.display(), e))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let schematic = single(&files, dir, "xml", "schematic export")?;
    let layout = single(&files, dir, "kicad_pcb", "PCB layout")?;

    Ok(ProjectFiles { schematic, layout })
}

fn single(files: &[PathBuf], dir: &Path, ext: &str, kind: &str) -> Result<PathBuf> {
    let matches: Vec<&PathBuf> = files.iter().filter(|p| has_extension(p, ext)).collect();

    match matches.as_slice() {
        [one] => Ok((*one).clone()),
        [] => Err(BomError::input_not_found(format!(
            "no .{} {} in {}",
            ext,
            kind,
            dir.display()
        ))),
        many => {
            let names: Vec<String> = many
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            Err(BomError::input_not_found(format!(
                "found {} .{} files in {} ({}); expected exactly one",
                many.len(),
                ext,
                dir.display(),
                names.join(", ")
            )))
        }
    }
}
