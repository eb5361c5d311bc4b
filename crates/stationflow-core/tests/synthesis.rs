use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use stationflow_core::synthesis::{append_reading, live_reading, synthesize_historical};
use stationflow_core::{Channel, StationConfig, StationflowError};

fn seeded() -> StdRng {
    StdRng::seed_from_u64(417)
}

#[test]
fn historical_synthesis_produces_one_reading_per_day_inside_the_ranges() {
    let config = StationConfig::default();
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
    let table = synthesize_historical(start, 30, &config, &mut seeded()).expect("synthesize");

    assert_eq!(table.height(), 30);

    let frame = table.frame();
    let timestamps = frame.column("timestamp").unwrap().datetime().unwrap();
    let first = timestamps.get(0).unwrap();
    let second = timestamps.get(1).unwrap();
    assert_eq!(second - first, 24 * 3_600 * 1_000_000);

    for channel in Channel::ALL {
        let range = config.range(channel);
        let values = frame.column(channel.column()).unwrap().f64().unwrap();
        for idx in 0..values.len() {
            let value = values.get(idx).expect("synthesized value present");
            assert!(
                value >= range.min && value <= range.max,
                "{channel} value {value} outside [{}, {}]",
                range.min,
                range.max
            );
        }
    }
}

#[test]
fn config_ranges_override_registry_defaults() {
    let config = StationConfig::from_toml(
        r#"
        [channels.pressure]
        min = 70.0
        max = 70.0
        "#,
    )
    .expect("config");

    let at = NaiveDateTime::parse_from_str("2024-03-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    let reading = live_reading(at, &config, &mut seeded()).expect("reading");
    let pressure = reading.frame().column("pressure_barg").unwrap().f64().unwrap();
    assert_eq!(pressure.get(0), Some(70.0));
}

#[test]
fn inverted_config_range_is_rejected() {
    let err = StationConfig::from_toml(
        r#"
        [channels.flow]
        min = 30.0
        max = 10.0
        "#,
    )
    .expect_err("inverted range");
    assert!(matches!(err, StationflowError::Config(_)));
}

#[test]
fn appending_the_same_reading_twice_keeps_one_copy() {
    let config = StationConfig::default();
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
    let existing = synthesize_historical(start, 3, &config, &mut seeded()).expect("synthesize");

    let at = NaiveDateTime::parse_from_str("2024-03-04 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    let reading = live_reading(at, &config, &mut seeded()).expect("reading");

    let once = append_reading(&existing, &reading).expect("first append");
    assert_eq!(once.height(), 4);

    let twice = append_reading(&once, &reading).expect("second append");
    assert_eq!(twice.height(), 4);

    // append keeps the table sorted by timestamp
    let timestamps = twice.frame().column("timestamp").unwrap().datetime().unwrap();
    let last = timestamps.get(twice.height() - 1).unwrap();
    assert_eq!(last, at.and_utc().timestamp_micros());
}
