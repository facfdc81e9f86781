//! Delimited output.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use super::columns::BOM_LINE_COLUMNS;
use super::ColumnLayout;
use crate::bom::ComponentRecord;
use crate::error::{BomError, Result};

/// Render records as a delimited table: one header row, then one row per
/// record. Missing fields become empty cells. Without records only the
/// header is written.
pub fn render_csv(
    records: &[ComponentRecord],
    layout: &ColumnLayout,
    delimiter: u8,
) -> io::Result<Vec<u8>> {
    let columns: Vec<String> = if records.is_empty() {
        BOM_LINE_COLUMNS.iter().map(|c| c.to_string()).collect()
    } else {
        layout.columns(records)
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(&columns)?;
    for record in records {
        writer.write_record(
            columns
                .iter()
                .map(|c| record.get(c).map(|v| v.to_string()).unwrap_or_default()),
        )?;
    }

    writer.into_inner().map_err(|e| e.into_error())
}

/// Write the table to `path` in a single write, so a rendering failure
/// leaves no file behind.
pub fn write_csv(
    records: &[ComponentRecord],
    layout: &ColumnLayout,
    delimiter: u8,
    path: &Path,
) -> Result<()> {
    let io_err = |source: io::Error| BomError::Io {
        path: path.to_path_buf(),
        source,
    };

    let bytes = render_csv(records, layout, delimiter).map_err(io_err)?;
    fs::write(path, &bytes).map_err(io_err)?;

    debug!(path = %path.display(), rows = records.len(), "wrote BOM");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::fields::{NAME, QUANTITY};
    use tempfile::TempDir;

    fn records() -> Vec<ComponentRecord> {
        let mut r = ComponentRecord::with_basics("R1 R2", "100", "R_0805");
        r.set(QUANTITY, 2u32);
        r.set(NAME, "RC0805, 1%");
        let mut c = ComponentRecord::with_basics("C1", "10nF", "C_0603");
        c.set(QUANTITY, 1u32);
        vec![c, r]
    }

    #[test]
    fn test_render_with_quoting_and_empty_cells() {
        let bytes = render_csv(&records(), &ColumnLayout::default(), b',').unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "Designator,Quantity,Value,Footprint,Name\n\
             C1,1,10nF,C_0603,\n\
             R1 R2,2,100,R_0805,\"RC0805, 1%\"\n"
        );
    }

    #[test]
    fn test_render_with_custom_delimiter() {
        let bytes = render_csv(&records(), &ColumnLayout::default(), b';').unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("Designator;Quantity;Value;Footprint;Name\n"));
        assert!(text.contains("R1 R2;2;100;R_0805;RC0805, 1%\n"));
    }

    #[test]
    fn test_render_no_records() {
        let bytes = render_csv(&[], &ColumnLayout::default(), b';').unwrap();
        assert_eq!(bytes, b"Designator;Quantity;Value;Footprint\n");
    }

    #[test]
    fn test_write_csv_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.csv");

        write_csv(&records(), &ColumnLayout::default(), b',', &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_write_csv_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("bom.csv");

        let err = write_csv(&records(), &ColumnLayout::default(), b',', &path).unwrap_err();
        assert!(matches!(err, BomError::Io { .. }));
        assert!(!path.exists());
    }
}
