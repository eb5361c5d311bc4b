mod common;
mod daily_report;
mod scada_csv;

pub use daily_report::DailyReportParser;
pub use scada_csv::ScadaCsvParser;

pub(crate) use common::{
    build_export_frame, parse_date, parse_datetime, parse_optional_f64, ExportColumns,
};
