use csv::StringRecord;

use crate::errors::ParserError;
use crate::model::{
    ExportSchema, ParseOptions, ParsedExport, RowPolicy, FLOW_COLUMN, PRESSURE_COLUMN,
    TEMPERATURE_COLUMN,
};
use crate::registry::ExportParser;

use super::{build_export_frame, parse_date, parse_optional_f64, ExportColumns};

/// Operator daily report: `Day,Inlet Pressure (barg),Inlet Temperature °C,
/// Inlet Flow (MMscfd)`. Dates carry no clock time and land on midnight.
pub struct DailyReportParser;

impl Default for DailyReportParser {
    fn default() -> Self {
        Self
    }
}

struct ColumnMap {
    day: usize,
    pressure: usize,
    temperature: usize,
    flow: usize,
}

fn is_pressure(name: &str) -> bool {
    name.eq_ignore_ascii_case("inlet pressure (barg)")
        || name.eq_ignore_ascii_case("inlet pressure")
        || name.eq_ignore_ascii_case(PRESSURE_COLUMN)
}

fn is_temperature(name: &str) -> bool {
    name.eq_ignore_ascii_case("inlet temperature °c")
        || name.eq_ignore_ascii_case("inlet temperature (°c)")
        || name.eq_ignore_ascii_case("inlet temperature")
        || name.eq_ignore_ascii_case(TEMPERATURE_COLUMN)
}

fn is_flow(name: &str) -> bool {
    name.eq_ignore_ascii_case("inlet flow (mmscfd)")
        || name.eq_ignore_ascii_case("inlet flow")
        || name.eq_ignore_ascii_case(FLOW_COLUMN)
}

impl DailyReportParser {
    const NAME: &'static str = "DAILY_REPORT";

    fn map_header(header: &StringRecord) -> Result<ColumnMap, ParserError> {
        let mut day = None;
        let mut pressure = None;
        let mut temperature = None;
        let mut flow = None;

        for (index, name) in header.iter().enumerate() {
            let trimmed = name.trim();
            if trimmed.eq_ignore_ascii_case("day") {
                day = Some(index);
            } else if is_pressure(trimmed) {
                pressure = Some(index);
            } else if is_temperature(trimmed) {
                temperature = Some(index);
            } else if is_flow(trimmed) {
                flow = Some(index);
            } else {
                return Err(ParserError::FormatMismatch {
                    parser: Self::NAME,
                    reason: format!("unrecognized column '{trimmed}'"),
                });
            }
        }

        let day = day.ok_or_else(|| ParserError::FormatMismatch {
            parser: Self::NAME,
            reason: "no day column in header".to_string(),
        })?;
        let pressure = pressure.ok_or_else(|| ParserError::MissingColumn {
            parser: Self::NAME,
            column: "Inlet Pressure (barg)".to_string(),
        })?;
        let temperature = temperature.ok_or_else(|| ParserError::MissingColumn {
            parser: Self::NAME,
            column: "Inlet Temperature °C".to_string(),
        })?;
        let flow = flow.ok_or_else(|| ParserError::MissingColumn {
            parser: Self::NAME,
            column: "Inlet Flow (MMscfd)".to_string(),
        })?;

        Ok(ColumnMap {
            day,
            pressure,
            temperature,
            flow,
        })
    }
}

impl ExportParser for DailyReportParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str, options: &ParseOptions) -> Result<ParsedExport, ParserError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut records = reader.records();

        let header = records
            .next()
            .ok_or(ParserError::FormatMismatch {
                parser: Self::NAME,
                reason: "file is empty".to_string(),
            })?
            .map_err(|err| ParserError::Csv {
                parser: Self::NAME,
                source: err,
            })?;

        let map = Self::map_header(&header)?;

        let mut columns =
            ExportColumns::new(&[PRESSURE_COLUMN, TEMPERATURE_COLUMN, FLOW_COLUMN]);
        let mut skipped_rows = 0usize;

        for (row_idx, record) in records.enumerate() {
            let record = record.map_err(|err| ParserError::Csv {
                parser: Self::NAME,
                source: err,
            })?;
            let line_index = row_idx + 1; // 1-based data-row index, header not counted

            if record.len() != header.len() {
                return Err(ParserError::DataRow {
                    parser: Self::NAME,
                    line_index,
                    message: format!(
                        "expected {} columns but found {}",
                        header.len(),
                        record.len()
                    ),
                });
            }

            let raw_day = record.get(map.day).unwrap_or("");
            let stamp = match parse_date(Self::NAME, raw_day, line_index) {
                Ok(stamp) => stamp,
                Err(err @ ParserError::Timestamp { .. }) => match options.on_bad_timestamp {
                    RowPolicy::Abort => return Err(err),
                    RowPolicy::SkipRow => {
                        skipped_rows += 1;
                        continue;
                    }
                },
                Err(err) => return Err(err),
            };

            let pressure = parse_optional_f64(
                Self::NAME,
                record.get(map.pressure).unwrap_or(""),
                line_index,
                "Inlet Pressure (barg)",
            )?;
            let temperature = parse_optional_f64(
                Self::NAME,
                record.get(map.temperature).unwrap_or(""),
                line_index,
                "Inlet Temperature °C",
            )?;
            let flow = parse_optional_f64(
                Self::NAME,
                record.get(map.flow).unwrap_or(""),
                line_index,
                "Inlet Flow (MMscfd)",
            )?;

            columns.push_row(stamp, vec![pressure, temperature, flow]);
        }

        if columns.row_count() == 0 && skipped_rows == 0 {
            return Err(ParserError::EmptyData { parser: Self::NAME });
        }

        build_export_frame(Self::NAME, ExportSchema::DailyReport, columns, skipped_rows)
    }
}
