// crates/stationflow-core/src/outputs.rs

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use stationflow_parser::{parse_station_export, ParseOptions, ParsedExport};

use crate::error::Result;
use crate::table::SeriesTable;

/// Timestamps are written in the SCADA export convention so the crate's own
/// CSV output round-trips through the export parser.
const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn write_canonical_csv(frame: &DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    let mut frame = frame.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_datetime_format(Some(CSV_DATETIME_FORMAT.to_string()))
        .finish(&mut frame)?;
    Ok(())
}

pub fn load_export(path: &Path, options: &ParseOptions) -> Result<ParsedExport> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_station_export(&content, options)?)
}

/// Loads any registered export format and validates it into a Series Table.
/// Returns the table plus the number of rows skipped under the row policy.
pub fn load_series_table(path: &Path, options: &ParseOptions) -> Result<(SeriesTable, usize)> {
    let parsed = load_export(path, options)?;
    let table = SeriesTable::new(parsed.frame)?;
    Ok((table, parsed.skipped_rows))
}
