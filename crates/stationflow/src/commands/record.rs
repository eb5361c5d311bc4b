// crates/stationflow/src/commands/record.rs

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, Timelike};
use stationflow_core::{outputs, synthesis};
use stationflow_parser::ParseOptions;
use tracing::info;

use super::{load_config, rng_from};

/// Appends one synthetic live reading to the real-time table, creating the
/// file on first use. The append is deduplicated: re-recording an identical
/// reading leaves the table unchanged.
pub fn handle_record_command(
    table_path: &Path,
    at: Option<NaiveDateTime>,
    config_path: Option<&Path>,
    seed: Option<u64>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let mut rng = rng_from(seed);

    // CSV timestamps carry second precision, so the default instant does too
    let at = match at {
        Some(at) => at,
        None => {
            let now = Local::now().naive_local();
            now.with_nanosecond(0).unwrap_or(now)
        }
    };

    let reading = synthesis::live_reading(at, &config, &mut rng)?;
    let combined = if table_path.exists() {
        let (existing, _) = outputs::load_series_table(table_path, &ParseOptions::default())
            .with_context(|| format!("failed to load table {}", table_path.display()))?;
        synthesis::append_reading(&existing, &reading)?
    } else {
        info!(path = %table_path.display(), "real-time table does not exist yet, creating it");
        reading
    };

    outputs::write_canonical_csv(combined.frame(), table_path)
        .with_context(|| format!("failed to write {}", table_path.display()))?;

    println!(
        "Recorded reading at {} ({} rows in {})",
        at,
        combined.height(),
        table_path.display(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_creates_then_extends_the_real_time_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("realtime.csv");

        let first = super::super::parse_instant("2024-03-01 08:00:00").unwrap();
        handle_record_command(&path, Some(first), None, Some(7)).expect("first record");

        let second = super::super::parse_instant("2024-03-01 09:00:00").unwrap();
        handle_record_command(&path, Some(second), None, Some(7)).expect("second record");

        let (table, _) =
            outputs::load_series_table(&path, &ParseOptions::default()).expect("reload table");
        assert_eq!(table.height(), 2);
    }
}
