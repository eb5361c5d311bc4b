// crates/stationflow/src/commands/clean.rs

use std::path::Path;

use anyhow::{Context, Result};
use stationflow_core::{cleaning, outputs};
use stationflow_parser::{ParseOptions, RowPolicy};
use tracing::warn;

pub fn handle_clean_command(input: &Path, output: &Path, policy: RowPolicy) -> Result<()> {
    let options = ParseOptions {
        on_bad_timestamp: policy,
    };
    let parsed = outputs::load_export(input, &options)
        .with_context(|| format!("failed to parse export {}", input.display()))?;
    if parsed.skipped_rows > 0 {
        warn!(
            skipped = parsed.skipped_rows,
            "dropped rows with unparseable timestamps"
        );
    }

    let report = cleaning::clean(&parsed.frame).context("failed to clean export")?;
    outputs::write_canonical_csv(report.table.frame(), output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Cleaned {} ({} format): {} rows in, {} rows out ({} incomplete, {} duplicates dropped)",
        input.display(),
        parsed.schema,
        report.rows_in,
        report.table.height(),
        report.dropped_missing,
        report.dropped_duplicates,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_round_trips_a_raw_export_to_canonical_csv() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("raw.csv");
        let output = dir.path().join("clean.csv");

        std::fs::write(
            &input,
            "timestamp,pressure,temperature,flow_rate\n\
             2024-03-01 00:00:00,55.2,25.1,18.4\n\
             2024-03-01 01:00:00,,25.3,18.1\n\
             2024-03-01 00:00:00,55.2,25.1,18.4\n\
             2024-03-01 02:00:00,56.0,24.9,17.9\n",
        )
        .expect("write raw export");

        handle_clean_command(&input, &output, RowPolicy::Abort).expect("clean command");

        let (table, skipped) =
            outputs::load_series_table(&output, &ParseOptions::default()).expect("reload output");
        assert_eq!(skipped, 0);
        assert_eq!(table.height(), 2);
    }

    #[test]
    fn skip_policy_tolerates_bad_timestamps() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("raw.csv");
        let output = dir.path().join("clean.csv");

        std::fs::write(
            &input,
            "timestamp,pressure,temperature,flow_rate\n\
             2024-03-01 00:00:00,55.2,25.1,18.4\n\
             garbage,55.8,25.0,18.2\n",
        )
        .expect("write raw export");

        assert!(handle_clean_command(&input, &output, RowPolicy::Abort).is_err());
        handle_clean_command(&input, &output, RowPolicy::SkipRow).expect("skip policy");

        let (table, _) =
            outputs::load_series_table(&output, &ParseOptions::default()).expect("reload output");
        assert_eq!(table.height(), 1);
    }
}
