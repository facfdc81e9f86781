//! Output column ordering.

use crate::bom::fields::*;
use crate::bom::ComponentRecord;

/// Well-known fields, in the order they lead the output.
pub const DEFAULT_COLUMN_ORDER: [&str; 14] = [
    DESIGNATOR,
    QUANTITY,
    VALUE,
    FOOTPRINT,
    FOOTPRINT_LIB,
    FOOTPRINT_PART,
    NAME,
    MANUFACTURER,
    MPN,
    LINK,
    COMPONENT_TYPE,
    SMD_PADS,
    THT_PADS,
    PCB_SIDE,
];

/// Columns every BOM line carries. An empty BOM still gets this header.
pub const BOM_LINE_COLUMNS: [&str; 4] = [DESIGNATOR, QUANTITY, VALUE, FOOTPRINT];

/// Column order for the output table.
///
/// Preferred columns come first, but only when at least one record has the
/// field. Every other field follows in the order it is first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    preferred: Vec<String>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN_ORDER.iter().map(|s| s.to_string()).collect())
    }
}

impl ColumnLayout {
    pub fn new(preferred: Vec<String>) -> Self {
        Self { preferred }
    }

    /// Resolve the columns for a set of records.
    pub fn columns(&self, records: &[ComponentRecord]) -> Vec<String> {
        let mut columns: Vec<String> = self
            .preferred
            .iter()
            .filter(|name| records.iter().any(|r| r.contains(name)))
            .cloned()
            .collect();

        for record in records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
        }

        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_first_then_first_seen() {
        let mut a = ComponentRecord::new();
        a.set("Color", "red");
        a.set(VALUE, "LED");
        a.set(DESIGNATOR, "D1");
        let mut b = ComponentRecord::new();
        b.set(DESIGNATOR, "D2");
        b.set("Voltage", "2V");
        b.set("Color", "green");
        b.set(QUANTITY, 1u32);

        let columns = ColumnLayout::default().columns(&[a, b]);

        assert_eq!(
            columns,
            vec!["Designator", "Quantity", "Value", "Color", "Voltage"]
        );
    }

    #[test]
    fn test_absent_preferred_columns_are_skipped() {
        let record = ComponentRecord::with_basics("R1", "100", "");
        let columns = ColumnLayout::default().columns(&[record]);
        assert_eq!(columns, vec!["Designator", "Value", "Footprint"]);
    }

    #[test]
    fn test_custom_order() {
        let record = ComponentRecord::with_basics("R1", "100", "R_0805");
        let layout = ColumnLayout::new(vec![FOOTPRINT.to_string(), VALUE.to_string()]);
        assert_eq!(
            layout.columns(&[record]),
            vec!["Footprint", "Value", "Designator"]
        );
    }

    #[test]
    fn test_no_records_no_columns() {
        assert!(ColumnLayout::default().columns(&[]).is_empty());
    }
}
