//! Terminal preview of the grouped BOM.

use tabled::{builder::Builder, settings::style::Style};

use super::ColumnLayout;
use crate::bom::ComponentRecord;

/// Render records as a rounded terminal table using the output column order.
pub fn render_table(records: &[ComponentRecord], layout: &ColumnLayout) -> String {
    let columns = layout.columns(records);
    let mut builder = Builder::default();

    builder.push_record(columns.iter().cloned());
    for record in records {
        builder.push_record(
            columns
                .iter()
                .map(|c| record.get(c).map(|v| v.to_string()).unwrap_or_default()),
        );
    }

    builder.build().with(Style::rounded()).to_string()
}
