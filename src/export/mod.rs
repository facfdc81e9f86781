//! BOM output: column layout, delimited file writer and terminal preview.

mod columns;
mod preview;
mod writer;

pub use columns::ColumnLayout;
pub use preview::render_table;
pub use writer::write_csv;
