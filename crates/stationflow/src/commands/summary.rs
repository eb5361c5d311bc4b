// crates/stationflow/src/commands/summary.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use stationflow_core::{
    outputs, pipeline, Channel, DataContext, Granularity, PipelineReport, PipelineRequest,
    SourceKind,
};
use stationflow_parser::ParseOptions;

pub struct SummaryArgs {
    pub real_time: PathBuf,
    pub historical: PathBuf,
    pub source: SourceKind,
    pub granularity: Granularity,
    pub channels: Vec<Channel>,
    pub json: bool,
}

pub fn handle_summary_command(args: SummaryArgs) -> Result<()> {
    let (real_time, _) = outputs::load_series_table(&args.real_time, &ParseOptions::default())
        .with_context(|| format!("failed to load real-time table {}", args.real_time.display()))?;
    let (historical, _) = outputs::load_series_table(&args.historical, &ParseOptions::default())
        .with_context(|| {
            format!(
                "failed to load historical table {}",
                args.historical.display()
            )
        })?;

    let context = DataContext::new(real_time, historical);
    let request = PipelineRequest {
        source: args.source,
        granularity: args.granularity,
        channels: args.channels,
    };
    let report = pipeline::run_request(&context, &request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Source: {}  Granularity: {}  Latest period: {}",
        report.source,
        report.granularity,
        report.latest.period.format("%Y-%m-%d %H:%M"),
    );
    render_cards(&report);
    render_comparison(&report);
    Ok(())
}

fn render_cards(report: &PipelineReport) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Channel", "Latest", "Average", "Unit"]);
    for channel in &report.channels {
        let spec = channel.spec();
        table.add_row(vec![
            spec.label.to_string(),
            format_value(report.latest.means.get(channel).copied().flatten()),
            format_value(report.averages.get(channel).copied().flatten()),
            spec.unit.to_string(),
        ]);
    }
    println!("{table}");
}

fn render_comparison(report: &PipelineReport) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["Period".to_string()];
    for channel in &report.channels {
        header.push(format!("{channel} (current)"));
        header.push(format!("{channel} (previous)"));
    }
    table.set_header(header);

    let pair = &report.comparison;
    for (current, previous) in pair.current.periods.iter().zip(&pair.previous.periods) {
        let mut row = vec![current.period.format("%Y-%m-%d %H:%M").to_string()];
        for channel in &report.channels {
            row.push(format_value(current.means.get(channel).copied().flatten()));
            row.push(format_value(previous.means.get(channel).copied().flatten()));
        }
        table.add_row(row);
    }
    println!("{table}");
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => "-".to_string(),
    }
}
