//! Error kinds for the BOM pipeline.
//!
//! Every kind is fatal: the pipeline stops at the first error and nothing
//! is written.

use std::path::PathBuf;

use thiserror::Error;

/// Failure raised by one of the pipeline stages.
#[derive(Debug, Error)]
pub enum BomError {
    /// A required input file or directory is missing, or file discovery was
    /// ambiguous.
    #[error("input not found: {message}")]
    InputNotFound { message: String },

    /// The schematic export or PCB layout could not be read or parsed.
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// The schematic and the layout do not describe the same board.
    #[error(
        "schematic and layout disagree: {matched} of {total} schematic components found on the PCB ({pcb_total} PCB footprints); missing: {}",
        .missing.join(", ")
    )]
    MergeIntegrity {
        matched: usize,
        total: usize,
        pcb_total: usize,
        missing: Vec<String>,
    },

    /// The output file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BomError {
    pub fn input_not_found(message: impl Into<String>) -> Self {
        Self::InputNotFound {
            message: message.into(),
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BomError>;
