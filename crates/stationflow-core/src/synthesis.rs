// crates/stationflow-core/src/synthesis.rs

use std::collections::HashSet;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;
use rand::Rng;
use stationflow_parser::{CHANNEL_COLUMNS, TIMESTAMP_COLUMN};
use tracing::info;

use crate::channels::Channel;
use crate::config::StationConfig;
use crate::error::{Result, StationflowError};
use crate::table::SeriesTable;

/// N days of synthetic daily readings starting at `start`, each channel drawn
/// uniformly from its configured range. Mirrors the sample-data generator the
/// historical dashboards were seeded with.
pub fn synthesize_historical(
    start: NaiveDate,
    days: u32,
    config: &StationConfig,
    rng: &mut impl Rng,
) -> Result<SeriesTable> {
    let mut stamps: Vec<i64> = Vec::with_capacity(days as usize);
    let mut values: Vec<Vec<f64>> = vec![Vec::with_capacity(days as usize); Channel::ALL.len()];

    for offset in 0..days {
        let date = start
            .checked_add_days(Days::new(u64::from(offset)))
            .ok_or_else(|| {
                StationflowError::Validation(format!(
                    "synthesis range starting {start} overflows the calendar at day {offset}"
                ))
            })?;
        stamps.push(date.and_time(NaiveTime::MIN).and_utc().timestamp_micros());
        for (column, channel) in values.iter_mut().zip(Channel::ALL) {
            column.push(draw(rng, config, channel));
        }
    }

    let table = build_table(stamps, values)?;
    info!(days, start = %start, "synthesized historical table");
    Ok(table)
}

/// One reading at `at` from the configured ranges, as a single-row table.
pub fn live_reading(
    at: NaiveDateTime,
    config: &StationConfig,
    rng: &mut impl Rng,
) -> Result<SeriesTable> {
    let stamps = vec![at.and_utc().timestamp_micros()];
    let values: Vec<Vec<f64>> = Channel::ALL
        .iter()
        .map(|channel| vec![draw(rng, config, *channel)])
        .collect();
    build_table(stamps, values)
}

/// Stacks `reading` onto `existing` and drops exact duplicate rows, first
/// occurrence winning. Rows with missing channel values survive the append;
/// only full-row duplicates are removed.
pub fn append_reading(existing: &SeriesTable, reading: &SeriesTable) -> Result<SeriesTable> {
    let mut combined = existing.frame().clone();
    combined.vstack_mut(reading.frame())?;

    let stacked = SeriesTable::new(combined)?;
    let timestamps = stacked.timestamps()?;
    let mut value_columns = Vec::with_capacity(Channel::ALL.len());
    for channel in Channel::ALL {
        value_columns.push(stacked.channel_values(channel)?);
    }

    let height = stacked.height();
    let mut kept_stamps: Vec<i64> = Vec::with_capacity(height);
    let mut kept_values: Vec<Vec<Option<f64>>> =
        vec![Vec::with_capacity(height); Channel::ALL.len()];
    let mut seen: HashSet<(i64, [Option<u64>; 3])> = HashSet::with_capacity(height);

    for idx in 0..height {
        let Some(stamp) = timestamps.get(idx) else {
            continue;
        };
        let row: Vec<Option<f64>> = value_columns.iter().map(|values| values.get(idx)).collect();
        let key = (
            stamp,
            [
                row[0].map(f64::to_bits),
                row[1].map(f64::to_bits),
                row[2].map(f64::to_bits),
            ],
        );
        if !seen.insert(key) {
            continue;
        }
        kept_stamps.push(stamp);
        for (column, value) in kept_values.iter_mut().zip(row) {
            column.push(value);
        }
    }

    let timestamp = Series::new(TIMESTAMP_COLUMN.into(), kept_stamps)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;
    let mut columns: Vec<Column> = Vec::with_capacity(CHANNEL_COLUMNS.len() + 1);
    columns.push(timestamp.into());
    for (name, column) in CHANNEL_COLUMNS.iter().zip(kept_values) {
        columns.push(Series::new((*name).into(), column).into());
    }

    SeriesTable::new(DataFrame::new(columns)?)
}

fn draw(rng: &mut impl Rng, config: &StationConfig, channel: Channel) -> f64 {
    let range = config.range(channel);
    let value = rng.random_range(range.min..=range.max);
    // two decimals, matching the precision of the station exports
    (value * 100.0).round() / 100.0
}

fn build_table(stamps: Vec<i64>, values: Vec<Vec<f64>>) -> Result<SeriesTable> {
    let timestamp = Series::new(TIMESTAMP_COLUMN.into(), stamps)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;
    let mut columns: Vec<Column> = Vec::with_capacity(CHANNEL_COLUMNS.len() + 1);
    columns.push(timestamp.into());
    for (name, column) in CHANNEL_COLUMNS.iter().zip(values) {
        columns.push(Series::new((*name).into(), column).into());
    }
    SeriesTable::new(DataFrame::new(columns)?)
}
