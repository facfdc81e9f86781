//! Readers for the two KiCad inputs: the schematic XML export and the
//! `.kicad_pcb` layout.

mod lexer;
mod netlist;
mod pcb;

pub use netlist::extract_components;
pub use pcb::extract_placements;

/// Board side a footprint is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    /// Side for a copper layer name, if it is one of the outer layers.
    pub fn from_copper_layer(layer: &str) -> Option<Self> {
        match layer {
            "F.Cu" => Some(Side::Top),
            "B.Cu" => Some(Side::Bottom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "Top",
            Side::Bottom => "Bottom",
        }
    }
}

/// Placement data for one footprint on the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Reference designator, empty if the footprint has none
    pub designator: String,
    /// Number of surface-mount pads
    pub smd_pads: u32,
    /// Number of plated through-hole pads
    pub tht_pads: u32,
    /// Side of the first copper layer named in the footprint
    pub side: Option<Side>,
}

impl Placement {
    /// Mounting technology label derived from the pad counts.
    pub fn component_type(&self) -> &'static str {
        match (self.smd_pads > 0, self.tht_pads > 0) {
            (true, true) => "SMD/THT",
            (true, false) => "SMD",
            (false, true) => "THT",
            (false, false) => "",
        }
    }
}
