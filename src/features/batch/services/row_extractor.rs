//! CSV row extraction.
//!
//! The first record is the header; every following record becomes a [`Row`]
//! keyed by header name. Records shorter than the header simply lack the
//! trailing columns, extra columns are ignored.

use std::collections::HashMap;
use std::io::Read;
use thiserror::Error;

use crate::features::batch::models::Row;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ParseError(#[from] csv::Error);

/// Lazily extract rows from `reader`.
///
/// The returned iterator consumes the reader and cannot be restarted.
pub fn extract<R: Read>(
    reader: R,
) -> Result<impl Iterator<Item = Result<Row, ParseError>>, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    Ok(csv_reader.into_records().map(move |record| {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let fields: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();

        Ok(Row::new(line, fields))
    }))
}
