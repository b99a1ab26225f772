//! Contains the [`TimeSeries`] structure: a timestamp-indexed table of named
//! numeric variables, the unit every station fetch produces and the aggregator
//! consumes.

use chrono::NaiveDateTime;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// An ordered mapping from timestamp to a fixed set of named variables.
///
/// The index is kept in a `BTreeMap`, so timestamps are always strictly increasing
/// and unique. Timestamps are timezone-naive. Missing values are `None`; a missing
/// value is never stored as `0.0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    columns: Vec<String>,
    rows: BTreeMap<NaiveDateTime, Vec<Option<f64>>>,
}

impl TimeSeries {
    /// Creates an empty series with the given variable names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: BTreeMap::new(),
        }
    }

    /// Builds a series from `(timestamp, values)` rows. Duplicate timestamps keep
    /// the first row seen.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use swissmeteo::TimeSeries;
    ///
    /// let t = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let series = TimeSeries::from_rows(
    ///     vec!["air_temperature".to_string()],
    ///     vec![(t, vec![Some(1.5)]), (t, vec![Some(9.0)])],
    /// );
    /// assert_eq!(series.len(), 1);
    /// assert_eq!(series.get(&t, "air_temperature"), Some(1.5));
    /// ```
    pub fn from_rows(
        columns: Vec<String>,
        rows: impl IntoIterator<Item = (NaiveDateTime, Vec<Option<f64>>)>,
    ) -> Self {
        let mut series = Self::new(columns);
        for (timestamp, values) in rows {
            series.insert(timestamp, values);
        }
        series
    }

    /// Inserts a row unless the timestamp is already present.
    ///
    /// Returns `false` when the row was dropped as a duplicate. Rows shorter than
    /// the column set are padded with missing values, longer rows are truncated.
    pub fn insert(&mut self, timestamp: NaiveDateTime, mut values: Vec<Option<f64>>) -> bool {
        values.resize(self.columns.len(), None);
        match self.rows.entry(timestamp) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(values);
                true
            }
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Timestamps in increasing order.
    pub fn timestamps(&self) -> impl Iterator<Item = &NaiveDateTime> {
        self.rows.keys()
    }

    /// Rows in timestamp order.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDateTime, &[Option<f64>])> {
        self.rows.iter().map(|(ts, values)| (ts, values.as_slice()))
    }

    /// All values at `timestamp`, in column order.
    pub fn row(&self, timestamp: &NaiveDateTime) -> Option<&[Option<f64>]> {
        self.rows.get(timestamp).map(Vec::as_slice)
    }

    /// The value of `column` at `timestamp`, if both exist and the value is not missing.
    pub fn get(&self, timestamp: &NaiveDateTime, column: &str) -> Option<f64> {
        let idx = self.column_index(column)?;
        self.rows.get(timestamp).and_then(|values| values[idx])
    }

    /// Keeps only rows with `start <= timestamp <= end`.
    pub fn between(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        if start > end {
            self.rows.clear();
            return self;
        }
        let mut kept = self.rows.split_off(&start);
        if let Some(after) = end.checked_add_signed(chrono::TimeDelta::nanoseconds(1)) {
            kept.split_off(&after);
        }
        self.rows = kept;
        self
    }

    /// Returns a copy with every value multiplied by `factor`. Missing values stay missing.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .map(|(ts, values)| (*ts, values.iter().map(|v| v.map(|x| x * factor)).collect()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_rows_are_sorted_regardless_of_insert_order() {
        let series = TimeSeries::from_rows(
            vec!["rainfall".into()],
            vec![
                (at(3, 0), vec![Some(3.0)]),
                (at(1, 0), vec![Some(1.0)]),
                (at(2, 0), vec![None]),
            ],
        );
        let index: Vec<_> = series.timestamps().copied().collect();
        assert_eq!(index, vec![at(1, 0), at(2, 0), at(3, 0)]);
        assert_eq!(series.get(&at(2, 0), "rainfall"), None);
    }

    #[test]
    fn test_insert_keeps_first_duplicate() {
        let mut series = TimeSeries::new(vec!["humidity".into()]);
        assert!(series.insert(at(1, 5), vec![Some(70.0)]));
        assert!(!series.insert(at(1, 5), vec![Some(10.0)]));
        assert_eq!(series.get(&at(1, 5), "humidity"), Some(70.0));
    }

    #[test]
    fn test_insert_pads_short_rows() {
        let mut series = TimeSeries::new(vec!["a".into(), "b".into()]);
        series.insert(at(1, 0), vec![Some(1.0)]);
        assert_eq!(series.get(&at(1, 0), "a"), Some(1.0));
        assert_eq!(series.get(&at(1, 0), "b"), None);
    }

    #[test]
    fn test_between_is_inclusive() {
        let series = TimeSeries::from_rows(
            vec!["a".into()],
            (1..=5).map(|d| (at(d, 12), vec![Some(d as f64)])),
        );
        let window = series.clone().between(at(2, 12), at(4, 12));
        assert_eq!(window.len(), 3);
        assert_eq!(window.get(&at(2, 12), "a"), Some(2.0));
        assert_eq!(window.get(&at(4, 12), "a"), Some(4.0));
        assert!(series.clone().between(at(4, 12), at(2, 12)).is_empty());
        assert_eq!(series.between(at(5, 12), NaiveDateTime::MAX).len(), 1);
    }

    #[test]
    fn test_scaled_leaves_missing_values_missing() {
        let series = TimeSeries::from_rows(
            vec!["a".into()],
            vec![(at(1, 0), vec![Some(10.0)]), (at(2, 0), vec![None])],
        );
        let scaled = series.scaled(0.25);
        assert_eq!(scaled.get(&at(1, 0), "a"), Some(2.5));
        assert_eq!(scaled.get(&at(2, 0), "a"), None);
    }
}
