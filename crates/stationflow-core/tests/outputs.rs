use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stationflow_core::outputs::{load_series_table, write_canonical_csv};
use stationflow_core::synthesis::synthesize_historical;
use stationflow_core::StationConfig;
use stationflow_parser::ParseOptions;

#[test]
fn canonical_csv_round_trips_through_the_export_parser() {
    let config = StationConfig::default();
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
    let mut rng = StdRng::seed_from_u64(99);
    let table = synthesize_historical(start, 5, &config, &mut rng).expect("synthesize");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("historical.csv");
    write_canonical_csv(table.frame(), &path).expect("write csv");

    let (loaded, skipped) =
        load_series_table(&path, &ParseOptions::default()).expect("load csv back");
    assert_eq!(skipped, 0);
    assert_eq!(loaded.height(), table.height());

    let written = table.frame().column("pressure_barg").unwrap().f64().unwrap();
    let read_back = loaded.frame().column("pressure_barg").unwrap().f64().unwrap();
    for idx in 0..table.height() {
        assert_eq!(written.get(idx), read_back.get(idx));
    }
}
