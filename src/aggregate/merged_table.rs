//! The wide output table and its conversion to a Polars `DataFrame`.

use crate::error::SwissMeteoError;
use crate::export;
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::path::Path;

/// Name of the timestamp column in the `DataFrame` form of a [`MergedTable`].
pub const DATETIME_COLUMN: &str = "datetime";

/// One `{variable}_{station}` column.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedColumn {
    pub name: String,
    /// One value per row of the table index.
    pub values: Vec<Option<f64>>,
}

/// All stations side by side on a shared, sorted timestamp index.
///
/// Produced by [`crate::aggregate()`]. No column is missing on every row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedTable {
    index: Vec<NaiveDateTime>,
    columns: Vec<MergedColumn>,
}

impl MergedTable {
    pub(crate) fn new(index: Vec<NaiveDateTime>, columns: Vec<MergedColumn>) -> Self {
        Self { index, columns }
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn columns(&self) -> &[MergedColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// The value of `column` at `timestamp`; `None` when either is absent or the
    /// value is missing.
    pub fn value(&self, timestamp: &NaiveDateTime, column: &str) -> Option<f64> {
        let row = self.index.binary_search(timestamp).ok()?;
        self.column(column).and_then(|values| values[row])
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.index.len()
    }

    /// Number of value columns, not counting the index.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Converts the table to a `DataFrame` with a leading `datetime` column
    /// followed by the value columns in table order.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        let datetime = DatetimeChunked::from_naive_datetime(
            DATETIME_COLUMN.into(),
            self.index.iter().copied(),
            TimeUnit::Milliseconds,
        );
        columns.push(datetime.into_series().into());
        for column in &self.columns {
            columns.push(Column::new(column.name.as_str().into(), column.values.as_slice()));
        }
        DataFrame::new(columns)
    }

    /// Renders the table as CSV.
    pub fn to_csv_bytes(&self) -> PolarsResult<Vec<u8>> {
        let mut df = self.to_dataframe()?;
        let mut buffer = Vec::new();
        CsvWriter::new(&mut buffer)
            .include_header(true)
            .finish(&mut df)?;
        Ok(buffer)
    }

    /// Writes the table to a Snappy-compressed Parquet file, creating the parent
    /// directory if needed.
    pub async fn write_parquet(&self, path: &Path) -> Result<(), SwissMeteoError> {
        export::write_parquet(self.to_dataframe()?, path).await
    }
}
