use crate::errors::{ParserAttempt, ParserError};
use crate::formats::{DailyReportParser, ScadaCsvParser};
use crate::model::{ParseOptions, ParsedExport};

pub trait ExportParser {
    fn name(&self) -> &'static str;
    fn parse(&self, content: &str, options: &ParseOptions) -> Result<ParsedExport, ParserError>;
}

pub fn parse_station_export(
    content: &str,
    options: &ParseOptions,
) -> Result<ParsedExport, ParserError> {
    let scada_csv = ScadaCsvParser;
    let daily_report = DailyReportParser;
    let parsers: [&dyn ExportParser; 2] = [&scada_csv, &daily_report];
    parse_with_parsers(content, options, &parsers)
}

pub fn parse_with_parsers(
    content: &str,
    options: &ParseOptions,
    parsers: &[&dyn ExportParser],
) -> Result<ParsedExport, ParserError> {
    let mut attempts = Vec::new();

    for parser in parsers {
        match parser.parse(content, options) {
            Ok(parsed) => return Ok(parsed),
            Err(ParserError::FormatMismatch { reason, .. }) => {
                attempts.push(ParserAttempt::new(parser.name(), reason));
            }
            Err(err) => return Err(err),
        }
    }

    Err(ParserError::NoMatchingParser { attempts })
}
