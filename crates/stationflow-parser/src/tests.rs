use std::fs;
use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::errors::ParserError;
use crate::model::{
    ExportSchema, ParseOptions, RowPolicy, CHANNEL_COLUMNS, PRESSURE_COLUMN, TEMPERATURE_COLUMN,
    TIMESTAMP_COLUMN,
};
use crate::parse_station_export;

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

fn micros(text: &str) -> i64 {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .expect("valid test timestamp")
        .and_utc()
        .timestamp_micros()
}

#[test]
fn parses_scada_export_with_missing_measurements() {
    let content = fixture("scada_export.csv");
    let parsed = parse_station_export(&content, &ParseOptions::default()).expect("SCADA parse");

    assert_eq!(parsed.schema, ExportSchema::ScadaCsv);
    assert_eq!(parsed.skipped_rows, 0);
    assert_eq!(parsed.frame.height(), 4);

    let mut names = vec![TIMESTAMP_COLUMN];
    names.extend(CHANNEL_COLUMNS);
    let columns: Vec<&str> = parsed
        .frame
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(columns, names);

    // empty cell and literal `nan` both parse to missing
    let pressure = parsed.frame.column(PRESSURE_COLUMN).unwrap().f64().unwrap();
    assert_eq!(pressure.get(0), Some(55.2));
    assert_eq!(pressure.get(1), None);
    let temperature = parsed
        .frame
        .column(TEMPERATURE_COLUMN)
        .unwrap()
        .f64()
        .unwrap();
    assert_eq!(temperature.get(2), None);

    let timestamps = parsed.frame.column(TIMESTAMP_COLUMN).unwrap().datetime().unwrap();
    assert_eq!(timestamps.get(0), Some(micros("2024-03-01 00:00:00")));
}

#[test]
fn parses_daily_report_dates_onto_midnight() {
    let content = fixture("daily_report.csv");
    let parsed = parse_station_export(&content, &ParseOptions::default()).expect("report parse");

    assert_eq!(parsed.schema, ExportSchema::DailyReport);
    assert_eq!(parsed.frame.height(), 2);

    let timestamps = parsed.frame.column(TIMESTAMP_COLUMN).unwrap().datetime().unwrap();
    assert_eq!(timestamps.get(0), Some(micros("2024-01-31 00:00:00")));
    assert_eq!(timestamps.get(1), Some(micros("2024-02-29 00:00:00")));

    let pressure = parsed.frame.column(PRESSURE_COLUMN).unwrap().f64().unwrap();
    assert_eq!(pressure.get(0), Some(62.5));
}

#[test]
fn canonical_column_names_are_accepted_as_aliases() {
    let content = "timestamp,pressure_barg,temperature_c,flow_mmscfd\n\
                   2024-03-01 00:00:00,55.2,25.1,18.4\n";
    let parsed = parse_station_export(content, &ParseOptions::default()).expect("alias parse");
    assert_eq!(parsed.schema, ExportSchema::ScadaCsv);
    assert_eq!(parsed.frame.height(), 1);
}

#[test]
fn bad_timestamp_aborts_by_default() {
    let content = fixture("scada_bad_timestamp.csv");
    let err = parse_station_export(&content, &ParseOptions::default()).expect_err("abort");

    match err {
        ParserError::Timestamp {
            line_index, value, ..
        } => {
            assert_eq!(line_index, 2);
            assert_eq!(value, "not-a-time");
        }
        other => panic!("expected timestamp error, got {other}"),
    }
}

#[test]
fn row_errors_carry_the_one_based_data_row_index() {
    // the header does not count: a failure on the very first data row is row 1
    let content = "timestamp,pressure,temperature,flow_rate\n\
                   not-a-time,55.8,25.0,18.2\n";
    let err = parse_station_export(content, &ParseOptions::default()).expect_err("bad first row");

    match err {
        ParserError::Timestamp { line_index, .. } => assert_eq!(line_index, 1),
        other => panic!("expected timestamp error, got {other}"),
    }
}

#[test]
fn bad_timestamp_is_skipped_and_counted_under_skip_policy() {
    let content = fixture("scada_bad_timestamp.csv");
    let options = ParseOptions {
        on_bad_timestamp: RowPolicy::SkipRow,
    };
    let parsed = parse_station_export(&content, &options).expect("skip parse");

    assert_eq!(parsed.skipped_rows, 1);
    assert_eq!(parsed.frame.height(), 2);
}

#[test]
fn recognized_header_with_missing_channel_is_a_hard_error() {
    let content = fixture("scada_missing_channel.csv");
    let err = parse_station_export(&content, &ParseOptions::default()).expect_err("missing flow");

    match err {
        ParserError::MissingColumn { column, .. } => assert_eq!(column, "flow_rate"),
        other => panic!("expected missing column error, got {other}"),
    }
}

#[test]
fn unknown_header_reports_every_attempted_format() {
    let content = "widget,sprocket\n1,2\n";
    let err = parse_station_export(content, &ParseOptions::default()).expect_err("no parser");

    match err {
        ParserError::NoMatchingParser { attempts } => {
            let parsers: Vec<&str> = attempts.iter().map(|attempt| attempt.parser).collect();
            assert_eq!(parsers, vec!["SCADA_CSV", "DAILY_REPORT"]);
        }
        other => panic!("expected no-matching-parser error, got {other}"),
    }
}

#[test]
fn header_only_file_is_empty_data() {
    let content = "timestamp,pressure,temperature,flow_rate\n";
    let err = parse_station_export(content, &ParseOptions::default()).expect_err("empty");
    assert!(matches!(err, ParserError::EmptyData { .. }));
}
