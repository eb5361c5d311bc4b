// crates/stationflow-core/src/table.rs

use std::fmt;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use stationflow_parser::{CHANNEL_COLUMNS, TIMESTAMP_COLUMN};

use crate::channels::Channel;
use crate::error::{Result, StationflowError};

/// A validated, time-ordered table of station readings: one `timestamp`
/// column (naive datetime, microseconds) plus one `f64` column per channel.
/// Immutable for the lifetime of a pipeline computation.
#[derive(Debug, Clone)]
pub struct SeriesTable {
    frame: DataFrame,
}

impl SeriesTable {
    /// Validates and normalizes a parsed canonical frame: the timestamp
    /// column must carry a datetime dtype, every channel column must be
    /// numeric (integers are coerced to `f64`, anything else is rejected),
    /// and rows are sorted ascending by timestamp. An empty frame is valid.
    pub fn new(frame: DataFrame) -> Result<Self> {
        let timestamp = frame
            .column(TIMESTAMP_COLUMN)
            .map_err(|_| StationflowError::MissingColumn(TIMESTAMP_COLUMN.to_string()))?;

        let timestamp = match timestamp.dtype() {
            DataType::Datetime(_, _) => {
                timestamp.cast(&DataType::Datetime(TimeUnit::Microseconds, None))?
            }
            other => {
                return Err(StationflowError::Validation(format!(
                    "column '{TIMESTAMP_COLUMN}' has dtype {other}, expected a datetime"
                )))
            }
        };

        let mut columns: Vec<Column> = Vec::with_capacity(CHANNEL_COLUMNS.len() + 1);
        columns.push(timestamp);

        for name in CHANNEL_COLUMNS {
            let column = frame
                .column(name)
                .map_err(|_| StationflowError::MissingColumn(name.to_string()))?;
            let column = match column.dtype() {
                DataType::Float64 => column.clone(),
                dt if is_numeric_dtype(dt) => column.cast(&DataType::Float64)?,
                other => {
                    return Err(StationflowError::Validation(format!(
                        "column '{name}' has dtype {other}, expected a numeric type"
                    )))
                }
            };
            columns.push(column);
        }

        let frame =
            DataFrame::new(columns)?.sort([TIMESTAMP_COLUMN], SortMultipleOptions::default())?;

        Ok(Self { frame })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Timestamps as microsecond datetimes, ascending.
    pub(crate) fn timestamps(&self) -> Result<&DatetimeChunked> {
        Ok(self.frame.column(TIMESTAMP_COLUMN)?.datetime()?)
    }

    pub(crate) fn channel_values(&self, channel: Channel) -> Result<&Float64Chunked> {
        Ok(self.frame.column(channel.column())?.f64()?)
    }
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Which of the two loaded tables a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    RealTime,
    Historical,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::RealTime => "real_time",
            SourceKind::Historical => "historical",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SourceKind {
    type Error = String;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "real_time" | "real-time" | "realtime" | "live" => Ok(SourceKind::RealTime),
            "historical" | "history" => Ok(SourceKind::Historical),
            other => Err(format!("unknown source '{other}'")),
        }
    }
}

/// The two loaded tables, constructed once per run and passed explicitly
/// into every pipeline call. There is no module-level shared state.
#[derive(Debug, Clone)]
pub struct DataContext {
    real_time: SeriesTable,
    historical: SeriesTable,
}

impl DataContext {
    pub fn new(real_time: SeriesTable, historical: SeriesTable) -> Self {
        Self {
            real_time,
            historical,
        }
    }

    pub fn table_for(&self, source: SourceKind) -> &SeriesTable {
        match source {
            SourceKind::RealTime => &self.real_time,
            SourceKind::Historical => &self.historical,
        }
    }
}
