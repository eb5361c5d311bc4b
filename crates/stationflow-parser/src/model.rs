use std::fmt;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Canonical column names shared by every export format. Format parsers map
/// whatever header convention they recognize onto these names.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const PRESSURE_COLUMN: &str = "pressure_barg";
pub const TEMPERATURE_COLUMN: &str = "temperature_c";
pub const FLOW_COLUMN: &str = "flow_mmscfd";

/// Channel columns in canonical order.
pub const CHANNEL_COLUMNS: [&str; 3] = [PRESSURE_COLUMN, TEMPERATURE_COLUMN, FLOW_COLUMN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportSchema {
    ScadaCsv,
    DailyReport,
}

impl ExportSchema {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportSchema::ScadaCsv => "scada_csv",
            ExportSchema::DailyReport => "daily_report",
        }
    }
}

impl fmt::Display for ExportSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ExportSchema {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "scada_csv" | "scada" => Ok(ExportSchema::ScadaCsv),
            "daily_report" | "report" => Ok(ExportSchema::DailyReport),
            other => Err(format!("unknown export schema '{other}'")),
        }
    }
}

/// What to do with a data row whose timestamp does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Fail the whole parse on the first bad timestamp.
    #[default]
    Abort,
    /// Drop the row and count it.
    SkipRow,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub on_bad_timestamp: RowPolicy,
}

#[derive(Debug, Clone)]
pub struct ParsedExport {
    pub schema: ExportSchema,
    /// Canonical table: `timestamp` (naive datetime, microseconds) plus one
    /// `f64` column per channel. Missing measurements are nulls.
    pub frame: DataFrame,
    /// Rows dropped under `RowPolicy::SkipRow`.
    pub skipped_rows: usize,
}
