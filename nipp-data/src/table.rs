//! Tabular output shared by the chart tables.

use nipp_core::Result;
use serde::Serialize;
use std::io::Write;

/// Column names a line chart renderer plots: one x column, many y columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineChart {
    pub x: String,
    pub y: Vec<String>,
}

/// A table that can be written out cell by cell.
///
/// Missing values are rendered as empty cells.
pub trait Tabular {
    fn headers(&self) -> Vec<String>;
    fn records(&self) -> Vec<Vec<String>>;
}

/// Write any [`Tabular`] as CSV with a header row.
pub fn write_csv<T: Tabular, W: Write>(table: &T, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.headers())?;
    for record in table.records() {
        wtr.write_record(&record)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub(crate) fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
