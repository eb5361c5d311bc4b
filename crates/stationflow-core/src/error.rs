// crates/stationflow-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StationflowError {
    #[error("required column '{0}' is missing from the table")]
    MissingColumn(String),

    #[error("pipeline input is empty: {0}")]
    EmptyInput(String),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Export parsing failed: {0}")]
    Parser(#[from] stationflow_parser::ParserError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, StationflowError>;
