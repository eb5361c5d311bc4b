// crates/stationflow-core/src/granularity.rs

use std::fmt;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Bucket width for resampling. Hour is the pre-aggregation step applied to
/// real-time feeds; the dashboard-facing granularities are Day and coarser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }

    /// The canonical instant naming the bucket containing `instant`.
    ///
    /// Sub-month buckets are labeled at their start (hour boundary, day
    /// midnight, ISO-week Monday midnight). Month and coarser buckets are
    /// labeled at their calendar end day at midnight (last day of month, last
    /// day of quarter, Dec 31), matching the month-end convention of the
    /// historical station reports. Every label is a fixed point: labeling a
    /// label returns it unchanged.
    pub fn bucket_label(&self, instant: NaiveDateTime) -> NaiveDateTime {
        let date = instant.date();
        let labeled = match self {
            Granularity::Hour => {
                return instant
                    .with_second(0)
                    .and_then(|dt| dt.with_minute(0))
                    .and_then(|dt| dt.with_nanosecond(0))
                    .unwrap_or(instant)
            }
            Granularity::Day => date,
            Granularity::Week => {
                let back = date.weekday().num_days_from_monday() as u64;
                date.checked_sub_days(Days::new(back)).unwrap_or(date)
            }
            Granularity::Month => last_day_of_month(date.year(), date.month()),
            Granularity::Quarter => {
                let quarter_end_month = ((date.month() - 1) / 3) * 3 + 3;
                last_day_of_month(date.year(), quarter_end_month)
            }
            Granularity::Year => last_day_of_month(date.year(), 12),
        };
        labeled.and_time(NaiveTime::MIN)
    }

    /// `bucket_label` on microsecond timestamps, the representation table
    /// timestamp columns use.
    pub fn bucket_label_micros(&self, micros: i64) -> i64 {
        let Some(instant) = DateTime::from_timestamp_micros(micros) else {
            return micros;
        };
        self.bucket_label(instant.naive_utc())
            .and_utc()
            .timestamp_micros()
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Granularity {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hour" | "hourly" | "h" => Ok(Granularity::Hour),
            "day" | "daily" | "d" => Ok(Granularity::Day),
            "week" | "weekly" | "w" => Ok(Granularity::Week),
            "month" | "monthly" | "m" => Ok(Granularity::Month),
            "quarter" | "quarterly" | "q" => Ok(Granularity::Quarter),
            "year" | "yearly" | "annual" | "y" => Ok(Granularity::Year),
            other => Err(format!("unknown granularity '{other}'")),
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
