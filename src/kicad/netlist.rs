//! Component extraction from the KiCad schematic XML export.
//!
//! ```text
//! <export version="D">
//!   <components>
//!     <comp ref="R1">
//!       <value>100</value>
//!       <footprint>Resistor_SMD:R_0805_2012Metric</footprint>
//!       <fields>
//!         <field name="Name">RC0805FR-07100RL</field>
//!       </fields>
//!     </comp>
//!   </components>
//! </export>
//! ```

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};
use tracing::{debug, warn};

use crate::bom::{ComponentRecord, IGNORED_FIELDS};
use crate::error::{BomError, Result};

/// Parse the export into one record per `<comp>`, in document order.
///
/// A missing `<footprint>` becomes an empty string. A `<comp>` without a
/// `ref` attribute or `<value>` child is an error.
pub fn parse_netlist(content: &str) -> std::result::Result<Vec<ComponentRecord>, String> {
    let doc = Document::parse(content).map_err(|e| e.to_string())?;

    doc.descendants()
        .filter(|n| n.has_tag_name("comp"))
        .map(|comp| parse_comp(&doc, comp))
        .collect()
}

fn parse_comp(doc: &Document, comp: Node) -> std::result::Result<ComponentRecord, String> {
    let location = || {
        let pos = doc.text_pos_at(comp.range().start);
        format!("line {}, column {}", pos.row, pos.col)
    };

    let designator = comp
        .attribute("ref")
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| format!("<comp> without a ref attribute at {}", location()))?;

    let value = child(comp, "value")
        .map(text)
        .ok_or_else(|| format!("component {} has no <value> ({})", designator, location()))?;

    let footprint = child(comp, "footprint").map(text).unwrap_or_default();

    let mut record = ComponentRecord::with_basics(designator, &value, &footprint);

    if let Some(fields) = child(comp, "fields") {
        for field in fields.children().filter(|n| n.has_tag_name("field")) {
            match field.attribute("name") {
                Some(name) if IGNORED_FIELDS.contains(&name) => {
                    warn!(designator, field = name, "skipping <field> that shadows a BOM column")
                }
                Some(name) => record.set(name, text(field)),
                None => warn!(designator, "skipping <field> without a name"),
            }
        }
    }

    Ok(record)
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn text(node: Node) -> String {
    node.text().unwrap_or("").trim().to_string()
}

/// Read and parse a schematic XML export.
pub fn extract_components(path: &Path) -> Result<Vec<ComponentRecord>> {
    let content = fs::read_to_string(path).map_err(|e| BomError::parse(path, e.to_string()))?;
    let components = parse_netlist(&content).map_err(|m| BomError::parse(path, m))?;

    debug!(
        path = %path.display(),
        count = components.len(),
        "read schematic components"
    );
    Ok(components)
}
