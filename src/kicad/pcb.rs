//! Placement extraction from `.kicad_pcb` layout files.
//!
//! Only a handful of forms matter here:
//!
//! ```text
//! (module Resistor_SMD:R_0805 (layer F.Cu)          ; `footprint` in KiCad 6+
//!   (fp_text reference R1 ...)                      ; `(property "Reference" "R1")` in KiCad 6+
//!   (pad 1 smd roundrect ... (layers F.Cu F.Paste F.Mask))
//!   (pad 2 thru_hole oval ... (layers *.Cu *.Mask)))
//! ```
//!
//! Everything else is skipped while keeping track of list nesting.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::lexer::{Lexer, Token};
use super::{Placement, Side};
use crate::error::{BomError, Result};

/// List heads that open a footprint placement.
const PLACEMENT_HEADS: [&str; 2] = ["module", "footprint"];

/// Atoms kept per open list; the scanner never looks past the second one.
const KEPT_ATOMS: usize = 2;

/// An open list: its head keyword and its first few atom children.
#[derive(Debug, Default)]
struct Frame {
    head: Option<String>,
    atoms: Vec<String>,
}

impl Frame {
    fn atom(&self, i: usize) -> Option<&str> {
        self.atoms.get(i).map(String::as_str)
    }
}

/// A placement whose list has not closed yet.
#[derive(Debug)]
struct OpenPlacement {
    /// Stack height at which the placement list was opened
    depth: usize,
    placement: Placement,
}

impl OpenPlacement {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            placement: Placement {
                designator: String::new(),
                smd_pads: 0,
                tht_pads: 0,
                side: None,
            },
        }
    }

    fn observe_atom(&mut self, atom: &str) {
        if self.placement.side.is_none() {
            self.placement.side = Side::from_copper_layer(atom);
        }
    }

    fn close_child(&mut self, frame: &Frame) {
        let p = &mut self.placement;
        match frame.head.as_deref() {
            Some("pad") => match frame.atom(1) {
                Some("smd") => p.smd_pads += 1,
                Some("thru_hole") => p.tht_pads += 1,
                _ => {}
            },
            Some("fp_text") if frame.atom(0) == Some("reference") => {
                set_designator(p, frame.atom(1));
            }
            Some("property") if frame.atom(0) == Some("Reference") => {
                set_designator(p, frame.atom(1));
            }
            _ => {}
        }
    }
}

fn set_designator(p: &mut Placement, designator: Option<&str>) {
    if !p.designator.is_empty() {
        return;
    }
    if let Some(d) = designator {
        p.designator = d.to_string();
    }
}

/// Parse layout file contents into one [`Placement`] per footprint, in file
/// order.
///
/// A footprint without a reference gets an empty designator. Unbalanced
/// parentheses and unterminated strings are errors.
pub fn parse_layout(content: &str) -> std::result::Result<Vec<Placement>, String> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut open: Option<OpenPlacement> = None;
    let mut placements = Vec::new();

    for token in Lexer::new(content) {
        let token = token.map_err(|e| format!("{} at byte {}", e.message, e.offset))?;

        match token {
            Token::Open => stack.push(Frame::default()),

            Token::Atom(word) => {
                let depth = stack.len();
                let Some(frame) = stack.last_mut() else {
                    continue;
                };

                if frame.head.is_none() {
                    if open.is_none() && PLACEMENT_HEADS.contains(&word.as_str()) {
                        open = Some(OpenPlacement::new(depth));
                    }
                    frame.head = Some(word);
                    continue;
                }

                if let Some(current) = open.as_mut() {
                    current.observe_atom(&word);
                }
                if frame.atoms.len() < KEPT_ATOMS {
                    frame.atoms.push(word);
                }
            }

            Token::Close => {
                let frame = stack.pop().ok_or_else(|| "unexpected ')'".to_string())?;

                let closes_placement = open
                    .as_ref()
                    .is_some_and(|current| stack.len() + 1 == current.depth);

                if closes_placement {
                    if let Some(done) = open.take() {
                        placements.push(done.placement);
                    }
                } else if let Some(current) = open.as_mut() {
                    current.close_child(&frame);
                }
            }
        }
    }

    if !stack.is_empty() {
        return Err(format!("{} unclosed '(' at end of file", stack.len()));
    }

    Ok(placements)
}

/// Read and parse a `.kicad_pcb` file.
pub fn extract_placements(path: &Path) -> Result<Vec<Placement>> {
    let content = fs::read_to_string(path).map_err(|e| BomError::parse(path, e.to_string()))?;
    let placements = parse_layout(&content).map_err(|m| BomError::parse(path, m))?;

    debug!(
        path = %path.display(),
        count = placements.len(),
        "read layout placements"
    );
    Ok(placements)
}
