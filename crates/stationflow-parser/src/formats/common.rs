use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;

use crate::errors::ParserError;
use crate::model::{ExportSchema, ParsedExport, TIMESTAMP_COLUMN};

/// Accumulates canonical columns while a format parser walks the data rows.
#[derive(Debug, Clone)]
pub(crate) struct ExportColumns {
    pub timestamp: Vec<i64>,
    pub channels: Vec<(String, Vec<Option<f64>>)>,
}

impl ExportColumns {
    pub fn new(channel_names: &[&str]) -> Self {
        Self {
            timestamp: Vec::new(),
            channels: channel_names
                .iter()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
        }
    }

    pub fn push_row(&mut self, stamp: i64, values: Vec<Option<f64>>) {
        self.timestamp.push(stamp);
        for ((_, column), value) in self.channels.iter_mut().zip(values) {
            column.push(value);
        }
    }

    pub fn row_count(&self) -> usize {
        self.timestamp.len()
    }
}

pub(crate) fn build_export_frame(
    parser: &'static str,
    schema: ExportSchema,
    columns: ExportColumns,
    skipped_rows: usize,
) -> Result<ParsedExport, ParserError> {
    let ts_series = Series::new(TIMESTAMP_COLUMN.into(), columns.timestamp);
    let ts_series = ts_series
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))
        .map_err(|err| ParserError::Validation {
            parser,
            message: format!("failed to cast timestamp column: {err}"),
        })?;

    let mut cols: Vec<Column> = Vec::with_capacity(columns.channels.len() + 1);
    cols.push(ts_series.into());
    for (name, values) in columns.channels {
        cols.push(Series::new(name.as_str().into(), values).into());
    }

    let frame = DataFrame::new(cols).map_err(|err| ParserError::Validation {
        parser,
        message: format!("failed to build export dataframe: {err}"),
    })?;

    Ok(ParsedExport {
        schema,
        frame,
        skipped_rows,
    })
}

pub(crate) fn parse_datetime(
    parser: &'static str,
    value: &str,
    line_index: usize,
) -> Result<i64, ParserError> {
    static FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];
    let trimmed = value.trim();
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.and_utc().timestamp_micros());
        }
    }
    Err(ParserError::Timestamp {
        parser,
        line_index,
        value: trimmed.to_string(),
    })
}

/// Date-only timestamps land on midnight. Full datetimes are accepted too so
/// report files written from already-timestamped tables still parse.
pub(crate) fn parse_date(
    parser: &'static str,
    value: &str,
    line_index: usize,
) -> Result<i64, ParserError> {
    static FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
    let trimmed = value.trim();
    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp_micros());
        }
    }
    parse_datetime(parser, trimmed, line_index)
}

pub(crate) fn parse_optional_f64(
    parser: &'static str,
    value: &str,
    line_index: usize,
    column: &str,
) -> Result<Option<f64>, ParserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|err| ParserError::DataRow {
            parser,
            line_index,
            message: format!("failed to parse column '{column}' as float: {err}"),
        })
}
