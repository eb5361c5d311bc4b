// crates/stationflow-core/src/pipeline.rs

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use stationflow_parser::TIMESTAMP_COLUMN;

use crate::channels::Channel;
use crate::error::{Result, StationflowError};
use crate::granularity::Granularity;
use crate::table::{DataContext, SeriesTable, SourceKind};

/// One resampling bucket: the canonical period label plus the per-channel
/// arithmetic mean over every reading that fell in the bucket. A `None` mean
/// is a gap (every reading in the bucket was missing that channel), which is
/// valid output, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedPeriod {
    pub period: NaiveDateTime,
    pub means: BTreeMap<Channel, Option<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregatedSeries {
    pub granularity: Granularity,
    pub channels: Vec<Channel>,
    /// Strictly ascending by period label, one entry per non-empty bucket.
    pub periods: Vec<AggregatedPeriod>,
}

impl AggregatedSeries {
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Renders the series as a canonical-schema frame (timestamp + channel
    /// columns) so aggregated output can be written as CSV.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let stamps: Vec<i64> = self
            .periods
            .iter()
            .map(|period| period.period.and_utc().timestamp_micros())
            .collect();
        let timestamp = Series::new(TIMESTAMP_COLUMN.into(), stamps)
            .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;

        let mut columns: Vec<Column> = Vec::with_capacity(self.channels.len() + 1);
        columns.push(timestamp.into());
        for channel in &self.channels {
            let values: Vec<Option<f64>> = self
                .periods
                .iter()
                .map(|period| period.means.get(channel).copied().flatten())
                .collect();
            columns.push(Series::new(channel.column().into(), values).into());
        }

        Ok(DataFrame::new(columns)?)
    }
}

/// Aligned current/previous pair at one granularity. `previous` is the lag-1
/// shift of `current` applied after aggregation: `previous[i]` carries the
/// means of `current[i - 1]` under the period label of `current[i]`, and
/// `previous[0]` is all gaps because nothing precedes the series start.
/// Alignment is strictly positional, never by calendar label.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonPair {
    pub current: AggregatedSeries,
    pub previous: AggregatedSeries,
}

/// What the presentation layer asks for. An empty channel list means all
/// channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRequest {
    pub source: SourceKind,
    pub granularity: Granularity,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl PipelineRequest {
    pub fn selected_channels(&self) -> Vec<Channel> {
        if self.channels.is_empty() {
            return Channel::ALL.to_vec();
        }
        let mut selected = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            if !selected.contains(channel) {
                selected.push(*channel);
            }
        }
        selected
    }
}

/// Everything the dashboard renders for one request: the latest-period
/// snapshot, whole-series averages, and the period comparison.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub source: SourceKind,
    pub granularity: Granularity,
    pub channels: Vec<Channel>,
    pub latest: AggregatedPeriod,
    pub averages: BTreeMap<Channel, Option<f64>>,
    pub comparison: ComparisonPair,
}

/// Groups readings into calendar-aligned buckets and averages each channel
/// per bucket. Buckets with no readings are omitted; an empty table produces
/// an empty series.
pub fn resample(
    table: &SeriesTable,
    granularity: Granularity,
    channels: &[Channel],
) -> Result<AggregatedSeries> {
    let timestamps = table.timestamps()?;
    let mut value_columns = Vec::with_capacity(channels.len());
    for channel in channels {
        value_columns.push(table.channel_values(*channel)?);
    }

    // label -> per-channel running (sum, count); BTreeMap keeps labels sorted
    let mut buckets: BTreeMap<i64, Vec<(f64, usize)>> = BTreeMap::new();

    for idx in 0..table.height() {
        let Some(stamp) = timestamps.get(idx) else {
            continue;
        };
        let label = granularity.bucket_label_micros(stamp);
        let slots = buckets
            .entry(label)
            .or_insert_with(|| vec![(0.0, 0); channels.len()]);
        for (slot, values) in slots.iter_mut().zip(&value_columns) {
            if let Some(value) = values.get(idx) {
                slot.0 += value;
                slot.1 += 1;
            }
        }
    }

    let mut periods = Vec::with_capacity(buckets.len());
    for (label, slots) in buckets {
        let mut means = BTreeMap::new();
        for (channel, (sum, count)) in channels.iter().zip(slots) {
            let mean = if count > 0 {
                Some(sum / count as f64)
            } else {
                None
            };
            means.insert(*channel, mean);
        }
        periods.push(AggregatedPeriod {
            period: micros_to_naive(label)?,
            means,
        });
    }

    Ok(AggregatedSeries {
        granularity,
        channels: channels.to_vec(),
        periods,
    })
}

/// The last period of a series, used for the "current" summary cards.
pub fn latest_period(series: &AggregatedSeries) -> Result<AggregatedPeriod> {
    series.periods.last().cloned().ok_or_else(|| {
        StationflowError::EmptyInput("aggregated series has no periods".to_string())
    })
}

/// Per-channel arithmetic mean over the entire un-bucketed table, independent
/// of granularity. Missing values are ignored; a channel with zero
/// non-missing rows yields `None`.
pub fn series_averages(
    table: &SeriesTable,
    channels: &[Channel],
) -> Result<BTreeMap<Channel, Option<f64>>> {
    let mut averages = BTreeMap::new();
    for channel in channels {
        let values = table.channel_values(*channel)?;
        let mut sum = 0.0;
        let mut count = 0usize;
        for idx in 0..values.len() {
            if let Some(value) = values.get(idx) {
                sum += value;
                count += 1;
            }
        }
        let mean = if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        };
        averages.insert(*channel, mean);
    }
    Ok(averages)
}

/// Resamples and pairs the result with its lag-1 shift. The pair always has
/// equal lengths.
pub fn compare_periods(
    table: &SeriesTable,
    granularity: Granularity,
    channels: &[Channel],
) -> Result<ComparisonPair> {
    let current = resample(table, granularity, channels)?;

    let mut previous_periods = Vec::with_capacity(current.periods.len());
    for (idx, period) in current.periods.iter().enumerate() {
        let means = if idx == 0 {
            channels.iter().map(|channel| (*channel, None)).collect()
        } else {
            current.periods[idx - 1].means.clone()
        };
        previous_periods.push(AggregatedPeriod {
            period: period.period,
            means,
        });
    }

    let previous = AggregatedSeries {
        granularity,
        channels: channels.to_vec(),
        periods: previous_periods,
    };

    Ok(ComparisonPair { current, previous })
}

/// Runs the full pipeline for one request against an explicit data context.
/// Fails with the empty-input error when the selected table aggregates to
/// zero periods.
pub fn run_request(context: &DataContext, request: &PipelineRequest) -> Result<PipelineReport> {
    let table = context.table_for(request.source);
    let channels = request.selected_channels();

    let comparison = compare_periods(table, request.granularity, &channels)?;
    let latest = latest_period(&comparison.current)?;
    let averages = series_averages(table, &channels)?;

    Ok(PipelineReport {
        source: request.source,
        granularity: request.granularity,
        channels,
        latest,
        averages,
        comparison,
    })
}

fn micros_to_naive(micros: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp_micros(micros)
        .map(|instant| instant.naive_utc())
        .ok_or_else(|| {
            StationflowError::Validation(format!("timestamp {micros} is out of datetime range"))
        })
}
