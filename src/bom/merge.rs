//! Join schematic records with the placement data read from the layout.

use tracing::debug;

use super::fields::{COMPONENT_TYPE, PCB_SIDE, SMD_PADS, THT_PADS};
use super::ComponentRecord;
use crate::error::{BomError, Result};
use crate::kicad::Placement;

/// Copy pad counts, side and component type from the layout into the
/// schematic records.
///
/// The schematic is authoritative: every schematic component must have a
/// placement with the same designator, otherwise the two files belong to
/// different revisions of the board and nothing is merged. Placements with
/// no schematic counterpart are dropped.
pub fn merge_components(
    mut components: Vec<ComponentRecord>,
    placements: &[Placement],
) -> Result<Vec<ComponentRecord>> {
    let matches: Vec<Option<&Placement>> = components
        .iter()
        .map(|c| placements.iter().find(|p| p.designator == c.designator()))
        .collect();

    let matched = matches.iter().filter(|m| m.is_some()).count();

    if matched < components.len() {
        let missing = components
            .iter()
            .zip(&matches)
            .filter(|(_, m)| m.is_none())
            .map(|(c, _)| c.designator().to_string())
            .collect();

        return Err(BomError::MergeIntegrity {
            matched,
            total: components.len(),
            pcb_total: placements.len(),
            missing,
        });
    }

    for (component, placement) in components.iter_mut().zip(matches) {
        let Some(placement) = placement else {
            continue;
        };

        component.set(SMD_PADS, placement.smd_pads);
        component.set(THT_PADS, placement.tht_pads);
        if let Some(side) = placement.side {
            component.set(PCB_SIDE, side.as_str());
        }
        component.set(COMPONENT_TYPE, placement.component_type());
    }

    let unused = placements
        .iter()
        .filter(|p| !components.iter().any(|c| c.designator() == p.designator))
        .count();
    if unused > 0 {
        debug!(unused, "layout footprints without a schematic component were ignored");
    }

    Ok(components)
}
