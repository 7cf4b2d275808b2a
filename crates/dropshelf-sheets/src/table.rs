//! Conversion of a header-first cell grid into [`RawRow`]s.

use dropshelf_catalog::RawRow;
use serde_json::{Map, Value};

use crate::error::SheetsError;

/// Turns the `values` grid of a sheet into rows keyed by column header.
///
/// The first row supplies the headers. For each later row, cells are paired
/// with headers by position; a missing or empty cell becomes `null`. When two
/// columns share a header the later column wins. A grid with no data rows
/// yields an empty list.
///
/// # Errors
///
/// Returns [`SheetsError::Deserialize`] if a keyed row does not fit
/// [`RawRow`].
pub fn rows_from_values(values: Vec<Vec<Value>>) -> Result<Vec<RawRow>, SheetsError> {
    let mut grid = values.into_iter();
    let Some(header_row) = grid.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.into_iter().map(header_text).collect();

    grid.enumerate()
        .map(|(idx, cells)| {
            let mut cells = cells.into_iter();
            let mut record = Map::with_capacity(headers.len());
            for header in &headers {
                record.insert(header.clone(), cells.next().unwrap_or(Value::Null));
            }

            row_from_record(record).map_err(|e| SheetsError::Deserialize {
                // +2: one for the header row, one for 1-based numbering.
                context: format!("sheet row {}", idx + 2),
                source: e,
            })
        })
        .collect()
}

/// Builds a [`RawRow`] from one header-keyed record.
///
/// Every cell is first reduced to text, number or `null`, so booleans and
/// nested values never fail the row.
///
/// # Errors
///
/// Returns the `serde_json` error if the normalized record still does not
/// fit [`RawRow`].
pub fn row_from_record(record: Map<String, Value>) -> Result<RawRow, serde_json::Error> {
    let record: Map<String, Value> = record
        .into_iter()
        .map(|(header, cell)| (header, normalize_cell(cell)))
        .collect();
    serde_json::from_value(Value::Object(record))
}

fn header_text(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Maps a cell onto what [`RawRow`] accepts: text, number, or `null`.
fn normalize_cell(cell: Value) -> Value {
    match cell {
        Value::String(s) if s.is_empty() => Value::Null,
        Value::String(_) | Value::Number(_) => cell,
        Value::Bool(b) => Value::String(if b { "TRUE" } else { "FALSE" }.to_owned()),
        Value::Null | Value::Array(_) | Value::Object(_) => Value::Null,
    }
}
