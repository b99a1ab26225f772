//! Turns raw MeteoSwiss CSV files into rows of a [`TimeSeries`].

use crate::types::time_series::TimeSeries;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::variables::VariableMap;
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::io::Cursor;

/// Name of the timestamp column in every MeteoSwiss observation file.
pub const TIMESTAMP_COLUMN: &str = "reference_timestamp";

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DAY_FIRST_FORMAT: &str = "%d.%m.%Y %H:%M";

/// The projected content of one file, before timestamps are interpreted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawFile {
    /// Output variable names present in the file, in [`VariableMap`] order.
    pub columns: Vec<String>,
    pub timestamps: Vec<Option<String>>,
    /// One vector per entry of `columns`, each as long as `timestamps`.
    pub values: Vec<Vec<Option<f64>>>,
}

/// Row counts gathered while assembling a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct AssemblyReport {
    pub rows: usize,
    pub unparseable: usize,
    pub duplicates: usize,
}

/// MeteoSwiss files are Latin-1; every byte maps to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Parses a timestamp as ISO 8601 first, then as day-first `DD.MM.YYYY HH:MM`.
///
/// # Examples
///
/// ```
/// use swissmeteo::parse_timestamp;
///
/// let a = parse_timestamp("01.03.2020 14:00").unwrap();
/// let b = parse_timestamp("2020-03-01T15:00:00").unwrap();
/// assert!(a < b);
/// assert!(parse_timestamp("not a date").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, ISO_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, DAY_FIRST_FORMAT))
        .ok()
}

/// Reads one semicolon separated, Latin-1 encoded file and keeps the timestamp
/// column plus the mapped variables it contains, renamed to their output names.
///
/// Every column is read as text and cast to `f64` afterwards, so cells that are
/// not numbers become missing values instead of failing the file.
pub(crate) fn parse_file(
    bytes: &[u8],
    file: &str,
    variables: &VariableMap,
) -> Result<RawFile, WeatherDataError> {
    let text = decode_latin1(bytes);

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_separator(b';'))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| WeatherDataError::CsvReadPolars {
            file: file.to_string(),
            source: e,
        })?;

    let timestamp_column =
        df.column(TIMESTAMP_COLUMN)
            .map_err(|_| WeatherDataError::MissingColumnError {
                file: file.to_string(),
                column: TIMESTAMP_COLUMN.to_string(),
            })?;
    let timestamps = timestamp_column
        .as_materialized_series()
        .str()
        .map_err(|e| WeatherDataError::ColumnOperationError {
            file: file.to_string(),
            source: e,
        })?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();

    let mut columns = Vec::new();
    let mut values = Vec::new();
    for variable in variables.iter() {
        let Ok(column) = df.column(&variable.code) else {
            continue;
        };
        let as_float = column
            .cast(&DataType::Float64)
            .map_err(|e| WeatherDataError::ColumnOperationError {
                file: file.to_string(),
                source: e,
            })?;
        let cells: Vec<Option<f64>> = as_float
            .as_materialized_series()
            .f64()
            .map_err(|e| WeatherDataError::ColumnOperationError {
                file: file.to_string(),
                source: e,
            })?
            .into_iter()
            .collect();
        columns.push(variable.name.clone());
        values.push(cells);
    }

    Ok(RawFile {
        columns,
        timestamps,
        values,
    })
}

/// Concatenates files row-wise, in order, into one series.
///
/// The series has every variable seen in at least one file, in [`VariableMap`]
/// order; a file lacking a variable contributes missing values for it. Rows whose
/// timestamp cannot be parsed are dropped. When several rows share a timestamp
/// the first one wins.
pub(crate) fn assemble(files: &[RawFile], variables: &VariableMap) -> (TimeSeries, AssemblyReport) {
    let columns: Vec<String> = variables
        .iter()
        .filter(|v| files.iter().any(|f| f.columns.contains(&v.name)))
        .map(|v| v.name.clone())
        .collect();

    let mut series = TimeSeries::new(columns.clone());
    let mut report = AssemblyReport::default();

    for file in files {
        // Position of each output column inside this file, if present.
        let positions: Vec<Option<usize>> = columns
            .iter()
            .map(|name| file.columns.iter().position(|c| c == name))
            .collect();

        for (row, raw_timestamp) in file.timestamps.iter().enumerate() {
            report.rows += 1;
            let Some(timestamp) = raw_timestamp.as_deref().and_then(parse_timestamp) else {
                report.unparseable += 1;
                continue;
            };
            let values = positions
                .iter()
                .map(|pos| pos.and_then(|p| file.values[p].get(row).copied().flatten()))
                .collect();
            if !series.insert(timestamp, values) {
                report.duplicates += 1;
            }
        }
    }

    (series, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn variables() -> VariableMap {
        VariableMap::new([("tre200h0", "air_temperature"), ("rre150h0", "rainfall")])
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_both_timestamp_formats_parse_in_order() {
        let day_first = parse_timestamp("01.03.2020 14:00").unwrap();
        let iso = parse_timestamp("2020-03-01T15:00:00").unwrap();
        assert_eq!(day_first, at(2020, 3, 1, 14));
        assert_eq!(iso, at(2020, 3, 1, 15));
        assert!(day_first < iso);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2020-13-01T00:00:00"), None);
    }

    #[test]
    fn test_parse_file_projects_and_renames() -> Result<(), Box<dyn std::error::Error>> {
        let body = "station_abbr;reference_timestamp;tre200h0;ure200h0;rre150h0\n\
                    BER;01.01.2022 00:00;1.5;80;0\n\
                    BER;01.01.2022 01:00;-;81;0.2\n";
        let raw = parse_file(body.as_bytes(), "ber.csv", &variables())?;

        assert_eq!(raw.columns, ["air_temperature", "rainfall"]);
        assert_eq!(
            raw.timestamps,
            [Some("01.01.2022 00:00".to_string()), Some("01.01.2022 01:00".to_string())]
        );
        assert_eq!(raw.values[0], [Some(1.5), None]);
        assert_eq!(raw.values[1], [Some(0.0), Some(0.2)]);
        Ok(())
    }

    #[test]
    fn test_parse_file_decodes_latin1() -> Result<(), Box<dyn std::error::Error>> {
        // 0xE8 is 'è' in Latin-1 and invalid on its own in UTF-8.
        let mut body = b"station_name;reference_timestamp;tre200h0\n".to_vec();
        body.extend_from_slice(b"Gen\xE8ve;2022-01-01T00:00:00;4.0\n");
        let raw = parse_file(&body, "gve.csv", &variables())?;
        assert_eq!(raw.values, vec![vec![Some(4.0)]]);
        Ok(())
    }

    #[test]
    fn test_parse_file_requires_timestamp_column() {
        let body = "station_abbr;tre200h0\nBER;1.0\n";
        let result = parse_file(body.as_bytes(), "ber.csv", &variables());
        assert!(matches!(
            result,
            Err(WeatherDataError::MissingColumnError { ref column, .. }) if column == TIMESTAMP_COLUMN
        ));
    }

    #[test]
    fn test_assemble_unions_columns_and_keeps_first_duplicate() {
        let older = RawFile {
            columns: vec!["air_temperature".into()],
            timestamps: vec![
                Some("31.12.2019 23:00".into()),
                Some("01.01.2020 00:00".into()),
            ],
            values: vec![vec![Some(1.0), Some(2.0)]],
        };
        let newer = RawFile {
            columns: vec!["rainfall".into(), "air_temperature".into()],
            timestamps: vec![
                Some("2020-01-01T00:00:00".into()),
                Some("garbage".into()),
                None,
                Some("2020-01-01T01:00:00".into()),
            ],
            values: vec![
                vec![Some(9.0), Some(9.0), Some(9.0), Some(0.5)],
                vec![Some(99.0), Some(99.0), Some(99.0), Some(3.0)],
            ],
        };

        let (series, report) = assemble(&[older, newer], &variables());

        assert_eq!(series.columns(), ["air_temperature", "rainfall"]);
        assert_eq!(series.len(), 3);
        assert_eq!(
            report,
            AssemblyReport {
                rows: 6,
                unparseable: 2,
                duplicates: 1
            }
        );
        // The first file's value for 2020-01-01 00:00 is kept.
        assert_eq!(series.get(&at(2020, 1, 1, 0), "air_temperature"), Some(2.0));
        assert_eq!(series.get(&at(2020, 1, 1, 0), "rainfall"), None);
        assert_eq!(series.get(&at(2020, 1, 1, 1), "rainfall"), Some(0.5));
        assert_eq!(series.get(&at(2019, 12, 31, 23), "air_temperature"), Some(1.0));
    }
}
