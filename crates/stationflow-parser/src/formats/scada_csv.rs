use csv::StringRecord;

use crate::errors::ParserError;
use crate::model::{
    ExportSchema, ParseOptions, ParsedExport, RowPolicy, FLOW_COLUMN, PRESSURE_COLUMN,
    TEMPERATURE_COLUMN,
};
use crate::registry::ExportParser;

use super::{build_export_frame, parse_datetime, parse_optional_f64, ExportColumns};

/// Raw SCADA feed: `timestamp,pressure,temperature,flow_rate` with full
/// datetimes. Canonical column names are accepted as header aliases so the
/// crate's own CSV output round-trips through this parser.
pub struct ScadaCsvParser;

impl Default for ScadaCsvParser {
    fn default() -> Self {
        Self
    }
}

struct ColumnMap {
    timestamp: usize,
    pressure: usize,
    temperature: usize,
    flow: usize,
}

impl ScadaCsvParser {
    const NAME: &'static str = "SCADA_CSV";

    /// A header without a timestamp column (or with a column this format does
    /// not know) is a mismatch and the registry moves on; a recognized header
    /// missing one of the channels is a hard error.
    fn map_header(header: &StringRecord) -> Result<ColumnMap, ParserError> {
        let mut timestamp = None;
        let mut pressure = None;
        let mut temperature = None;
        let mut flow = None;

        for (index, name) in header.iter().enumerate() {
            let trimmed = name.trim();
            if trimmed.eq_ignore_ascii_case("timestamp") {
                timestamp = Some(index);
            } else if trimmed.eq_ignore_ascii_case("pressure")
                || trimmed.eq_ignore_ascii_case(PRESSURE_COLUMN)
            {
                pressure = Some(index);
            } else if trimmed.eq_ignore_ascii_case("temperature")
                || trimmed.eq_ignore_ascii_case(TEMPERATURE_COLUMN)
            {
                temperature = Some(index);
            } else if trimmed.eq_ignore_ascii_case("flow_rate")
                || trimmed.eq_ignore_ascii_case(FLOW_COLUMN)
            {
                flow = Some(index);
            } else {
                return Err(ParserError::FormatMismatch {
                    parser: Self::NAME,
                    reason: format!("unrecognized column '{trimmed}'"),
                });
            }
        }

        let timestamp = timestamp.ok_or_else(|| ParserError::FormatMismatch {
            parser: Self::NAME,
            reason: "no timestamp column in header".to_string(),
        })?;
        let pressure = pressure.ok_or_else(|| ParserError::MissingColumn {
            parser: Self::NAME,
            column: "pressure".to_string(),
        })?;
        let temperature = temperature.ok_or_else(|| ParserError::MissingColumn {
            parser: Self::NAME,
            column: "temperature".to_string(),
        })?;
        let flow = flow.ok_or_else(|| ParserError::MissingColumn {
            parser: Self::NAME,
            column: "flow_rate".to_string(),
        })?;

        Ok(ColumnMap {
            timestamp,
            pressure,
            temperature,
            flow,
        })
    }
}

impl ExportParser for ScadaCsvParser {
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

            let raw_stamp = record.get(map.timestamp).unwrap_or("");
            let stamp = match parse_datetime(Self::NAME, raw_stamp, line_index) {
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
                "pressure",
            )?;
            let temperature = parse_optional_f64(
                Self::NAME,
                record.get(map.temperature).unwrap_or(""),
                line_index,
                "temperature",
            )?;
            let flow = parse_optional_f64(
                Self::NAME,
                record.get(map.flow).unwrap_or(""),
                line_index,
                "flow_rate",
            )?;

            columns.push_row(stamp, vec![pressure, temperature, flow]);
        }

        if columns.row_count() == 0 && skipped_rows == 0 {
            return Err(ParserError::EmptyData { parser: Self::NAME });
        }

        build_export_frame(Self::NAME, ExportSchema::ScadaCsv, columns, skipped_rows)
    }
}
