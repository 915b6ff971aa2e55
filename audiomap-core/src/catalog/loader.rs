//! Catalog ingestion from CSV.
//!
//! Fatal conditions: unreadable source, unparsable header, or a missing
//! required column. Everything per-row is recoverable: the row is skipped
//! with a warning and the load continues.

use super::record::CatalogRecord;
use crate::{Error, Result};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use tracing::warn;

/// Required catalog columns, matched against the header row by exact name.
pub(super) const REQUIRED_COLUMNS: [&str; 4] = ["Company", "Folder", "File Name", "Transcript"];

/// Read catalog rows into validated records, preserving row order.
pub(super) fn read_records<R: Read>(reader: R) -> Result<Vec<CatalogRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut positions = [0usize; 4];
    let mut missing = Vec::new();
    for (i, column) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h == *column) {
            Some(p) => positions[i] = p,
            None => missing.push(*column),
        }
    }
    if !missing.is_empty() {
        return Err(Error::CatalogFormat(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut records = Vec::new();
    for (row_index, row) in csv_reader.records().enumerate() {
        // header is line 1, first data row line 2
        let line = row_index + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("skipping unreadable catalog row at line {}: {}", line, e);
                continue;
            }
        };
        let field = |i: usize| row.get(positions[i]).unwrap_or("");
        match CatalogRecord::from_fields(field(0), field(1), field(2), field(3)) {
            Ok(record) => records.push(record),
            Err(e) => warn!("skipping catalog row at line {}: {}", line, e),
        }
    }
    Ok(records)
}
