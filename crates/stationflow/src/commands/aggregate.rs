// crates/stationflow/src/commands/aggregate.rs

use std::path::Path;

use anyhow::{Context, Result};
use stationflow_core::{outputs, pipeline, Channel, Granularity};
use stationflow_parser::ParseOptions;

pub fn handle_aggregate_command(
    input: &Path,
    output: &Path,
    granularity: Granularity,
) -> Result<()> {
    let (table, _) = outputs::load_series_table(input, &ParseOptions::default())
        .with_context(|| format!("failed to load table {}", input.display()))?;

    let series = pipeline::resample(&table, granularity, &Channel::ALL)?;
    let frame = series.to_frame()?;
    outputs::write_canonical_csv(&frame, output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Aggregated {} rows from {} into {} {} bucket(s)",
        table.height(),
        input.display(),
        series.len(),
        granularity,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_readings_aggregate_to_one_daily_bucket() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("realtime.csv");
        let output = dir.path().join("daily.csv");

        let mut content = String::from("timestamp,pressure,temperature,flow_rate\n");
        for hour in 0..24 {
            content.push_str(&format!(
                "2024-03-01 {hour:02}:00:00,{},25.0,18.0\n",
                50.0 + hour as f64
            ));
        }
        std::fs::write(&input, content).expect("write table");

        handle_aggregate_command(&input, &output, Granularity::Day).expect("aggregate");

        let (aggregated, _) =
            outputs::load_series_table(&output, &ParseOptions::default()).expect("reload output");
        assert_eq!(aggregated.height(), 1);
        let pressure = aggregated
            .frame()
            .column("pressure_barg")
            .unwrap()
            .f64()
            .unwrap();
        assert_eq!(pressure.get(0), Some(61.5));
    }
}
