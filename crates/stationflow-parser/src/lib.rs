pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::{ParserAttempt, ParserError};
pub use model::{
    ExportSchema, ParseOptions, ParsedExport, RowPolicy, CHANNEL_COLUMNS, FLOW_COLUMN,
    PRESSURE_COLUMN, TEMPERATURE_COLUMN, TIMESTAMP_COLUMN,
};
pub use registry::{parse_station_export, parse_with_parsers, ExportParser};

#[cfg(test)]
mod tests;
