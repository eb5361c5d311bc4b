// crates/stationflow-core/src/cleaning.rs

use std::collections::HashSet;

use polars::prelude::*;
use stationflow_parser::{CHANNEL_COLUMNS, TIMESTAMP_COLUMN};
use tracing::info;

use crate::channels::Channel;
use crate::error::Result;
use crate::table::SeriesTable;

#[derive(Debug)]
pub struct CleaningReport {
    pub table: SeriesTable,
    pub rows_in: usize,
    pub dropped_missing: usize,
    pub dropped_duplicates: usize,
}

/// Turns a parsed canonical frame into a valid Series Table: rows with a
/// missing value in any channel column are dropped, then exact duplicate
/// rows (same timestamp and channel values, first occurrence wins). The
/// pipeline itself never logs; this upstream stage does.
pub fn clean(frame: &DataFrame) -> Result<CleaningReport> {
    let normalized = SeriesTable::new(frame.clone())?;
    let rows_in = normalized.height();

    let timestamps = normalized.timestamps()?;
    let mut value_columns = Vec::with_capacity(Channel::ALL.len());
    for channel in Channel::ALL {
        value_columns.push(normalized.channel_values(channel)?);
    }

    let mut kept_stamps: Vec<i64> = Vec::with_capacity(rows_in);
    let mut kept_values: Vec<Vec<f64>> = vec![Vec::with_capacity(rows_in); Channel::ALL.len()];
    let mut seen: HashSet<(i64, [u64; 3])> = HashSet::with_capacity(rows_in);
    let mut dropped_missing = 0usize;
    let mut dropped_duplicates = 0usize;

    for idx in 0..rows_in {
        let Some(stamp) = timestamps.get(idx) else {
            dropped_missing += 1;
            continue;
        };

        let mut row = [0.0f64; 3];
        let mut complete = true;
        for (slot, values) in row.iter_mut().zip(&value_columns) {
            match values.get(idx) {
                Some(value) => *slot = value,
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if !complete {
            dropped_missing += 1;
            continue;
        }

        let key = (stamp, [row[0].to_bits(), row[1].to_bits(), row[2].to_bits()]);
        if !seen.insert(key) {
            dropped_duplicates += 1;
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
    for (name, values) in CHANNEL_COLUMNS.iter().zip(kept_values) {
        columns.push(Series::new((*name).into(), values).into());
    }

    let table = SeriesTable::new(DataFrame::new(columns)?)?;

    info!(
        rows_in,
        rows_out = table.height(),
        dropped_missing,
        dropped_duplicates,
        "cleaned station table"
    );

    Ok(CleaningReport {
        table,
        rows_in,
        dropped_missing,
        dropped_duplicates,
    })
}
