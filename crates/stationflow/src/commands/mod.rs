// crates/stationflow/src/commands/mod.rs

pub mod aggregate;
pub mod clean;
pub mod record;
pub mod summary;
pub mod synthesize;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stationflow_core::{Channel, Granularity, SourceKind, StationConfig};
use stationflow_parser::RowPolicy;

pub fn parse_granularity(value: &str) -> std::result::Result<Granularity, String> {
    Granularity::try_from(value)
}

pub fn parse_source(value: &str) -> std::result::Result<SourceKind, String> {
    SourceKind::try_from(value)
}

pub fn parse_channel(value: &str) -> std::result::Result<Channel, String> {
    Channel::try_from(value)
}

pub fn parse_row_policy(value: &str) -> std::result::Result<RowPolicy, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "abort" => Ok(RowPolicy::Abort),
        "skip" => Ok(RowPolicy::SkipRow),
        other => Err(format!("unknown row policy '{other}', expected abort or skip")),
    }
}

pub fn parse_instant(value: &str) -> std::result::Result<NaiveDateTime, String> {
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(instant) = NaiveDateTime::parse_from_str(value.trim(), format) {
            return Ok(instant);
        }
    }
    Err(format!(
        "could not parse '{value}' as a timestamp (expected YYYY-MM-DD HH:MM:SS)"
    ))
}

pub fn load_config(path: Option<&Path>) -> Result<StationConfig> {
    match path {
        Some(path) => StationConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(StationConfig::default()),
    }
}

pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
