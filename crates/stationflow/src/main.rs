// crates/stationflow/src/main.rs

use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
use commands::aggregate::handle_aggregate_command;
use commands::clean::handle_clean_command;
use commands::record::handle_record_command;
use commands::summary::{handle_summary_command, SummaryArgs};
use commands::synthesize::handle_synthesize_command;
use stationflow_core::{Channel, Granularity, SourceKind};
use stationflow_parser::RowPolicy;

/// Operator tooling for the compression-station sensor pipeline
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Parse a raw export, drop incomplete and duplicate rows, write the canonical CSV.
    Clean {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// What to do with rows whose timestamp does not parse: abort or skip.
        #[arg(long, default_value = "abort", value_parser = commands::parse_row_policy)]
        on_bad_timestamp: RowPolicy,
    },
    /// Resample a canonical table into calendar-aligned buckets.
    Aggregate {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long, value_parser = commands::parse_granularity)]
        granularity: Granularity,
    },
    /// Run the dashboard pipeline and print summary cards plus the period comparison.
    Summary {
        #[arg(long)]
        real_time: PathBuf,
        #[arg(long)]
        historical: PathBuf,
        #[arg(long, default_value = "real_time", value_parser = commands::parse_source)]
        source: SourceKind,
        #[arg(short, long, default_value = "day", value_parser = commands::parse_granularity)]
        granularity: Granularity,
        /// Comma-separated channel subset; all channels when omitted.
        #[arg(long, value_delimiter = ',', value_parser = commands::parse_channel)]
        channels: Vec<Channel>,
        /// Emit the full report as JSON instead of terminal tables.
        #[arg(long)]
        json: bool,
    },
    /// Write a synthetic historical table.
    Synthesize {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long, default_value_t = 30)]
        days: u32,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Append one synthetic live reading to the real-time table.
    Record {
        #[arg(long)]
        table: PathBuf,
        /// Reading instant, YYYY-MM-DD HH:MM:SS; defaults to now.
        #[arg(long, value_parser = commands::parse_instant)]
        at: Option<NaiveDateTime>,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Clean {
            input,
            output,
            on_bad_timestamp,
        } => handle_clean_command(&input, &output, on_bad_timestamp),
        Commands::Aggregate {
            input,
            output,
            granularity,
        } => handle_aggregate_command(&input, &output, granularity),
        Commands::Summary {
            real_time,
            historical,
            source,
            granularity,
            channels,
            json,
        } => handle_summary_command(SummaryArgs {
            real_time,
            historical,
            source,
            granularity,
            channels,
            json,
        }),
        Commands::Synthesize {
            output,
            start,
            days,
            config,
            seed,
        } => handle_synthesize_command(&output, start, days, config.as_deref(), seed),
        Commands::Record {
            table,
            at,
            config,
            seed,
        } => handle_record_command(&table, at, config.as_deref(), seed),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("STATIONFLOW_LOG_FORMAT")
        .map(|value| value.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
