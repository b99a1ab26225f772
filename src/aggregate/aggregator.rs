//! Combines per-station series into the population-weighted national series
//! and the wide merged table.

use crate::aggregate::error::AggregateError;
use crate::aggregate::merged_table::{MergedColumn, MergedTable};
use crate::types::time_series::TimeSeries;
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Label of the weighted national series in the merged table.
pub const GLOBAL_LABEL: &str = "global";

/// How the weighted national value is formed when only some stations report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlobalPolicy {
    /// `Σ weight × value` over the stations reporting at that timestamp. A
    /// timestamp where only some stations report yields a partial sum.
    #[default]
    PartialSum,
    /// The partial sum divided by the summed weight of the reporting stations,
    /// i.e. a weighted mean over whoever reported.
    Renormalized,
}

/// The series of one station together with its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSeries {
    pub station_code: String,
    pub weight: f64,
    pub series: TimeSeries,
}

#[derive(Clone, Copy, Default)]
struct Accumulator {
    weighted_sum: f64,
    weight_sum: f64,
    reporting: bool,
}

/// Computes the weighted national series.
///
/// Stations are aligned on the union of their timestamps. A cell only sums the
/// stations that have a value there; when no station reports, the cell is
/// missing rather than zero. Variables are the union of all station variables,
/// in order of first appearance.
pub fn weighted_global(stations: &[StationSeries], policy: GlobalPolicy) -> TimeSeries {
    let mut columns: Vec<String> = Vec::new();
    for station in stations.iter().filter(|s| !s.series.is_empty()) {
        for column in station.series.columns() {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }

    let mut cells: BTreeMap<NaiveDateTime, Vec<Accumulator>> = BTreeMap::new();
    // Zero-weight stations never count as reporting.
    for station in stations
        .iter()
        .filter(|s| !s.series.is_empty() && s.weight > 0.0)
    {
        let positions: Vec<usize> = station
            .series
            .columns()
            .iter()
            .filter_map(|c| columns.iter().position(|g| g == c))
            .collect();
        let weighted = station.series.scaled(station.weight);
        for (timestamp, values) in weighted.iter() {
            let row = cells
                .entry(*timestamp)
                .or_insert_with(|| vec![Accumulator::default(); columns.len()]);
            for (value, &pos) in values.iter().zip(&positions) {
                if let Some(v) = value {
                    let cell = &mut row[pos];
                    cell.weighted_sum += v;
                    cell.weight_sum += station.weight;
                    cell.reporting = true;
                }
            }
        }
    }

    let rows = cells.into_iter().map(|(timestamp, row)| {
        let values = row
            .into_iter()
            .map(|cell| match (cell.reporting, policy) {
                (false, _) => None,
                (true, GlobalPolicy::PartialSum) => Some(cell.weighted_sum),
                (true, GlobalPolicy::Renormalized) if cell.weight_sum > 0.0 => {
                    Some(cell.weighted_sum / cell.weight_sum)
                }
                (true, GlobalPolicy::Renormalized) => None,
            })
            .collect();
        (timestamp, values)
    });
    TimeSeries::from_rows(columns, rows)
}

/// Joins labelled series side by side into one table.
///
/// Column `c` of the series labelled `l` becomes `c_l`. Rows are the sorted union
/// of every series' timestamps; a series lacking a timestamp has missing values
/// there. Columns that are missing on every row are dropped, so an empty series
/// contributes nothing.
///
/// # Errors
///
/// [`AggregateError::ColumnCollision`] if two labelled columns share a name.
pub fn merge_series<'a>(
    labelled: impl IntoIterator<Item = (&'a str, &'a TimeSeries)>,
) -> Result<MergedTable, AggregateError> {
    let labelled: Vec<(&str, &TimeSeries)> = labelled
        .into_iter()
        .filter(|(_, series)| !series.is_empty())
        .collect();

    let index: Vec<NaiveDateTime> = labelled
        .iter()
        .flat_map(|(_, series)| series.timestamps().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut names = HashSet::new();
    let mut columns = Vec::new();
    for (label, series) in &labelled {
        for (col_idx, column) in series.columns().iter().enumerate() {
            let name = format!("{column}_{label}");
            if !names.insert(name.clone()) {
                return Err(AggregateError::ColumnCollision(name));
            }
            let values: Vec<Option<f64>> = index
                .iter()
                .map(|ts| series.row(ts).and_then(|row| row[col_idx]))
                .collect();
            if values.iter().all(Option::is_none) {
                continue;
            }
            columns.push(MergedColumn { name, values });
        }
    }

    Ok(MergedTable::new(index, columns))
}

/// Builds the merged table for a set of stations, optionally adding the
/// weighted national columns after the station columns.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use swissmeteo::{aggregate, GlobalPolicy, StationSeries, TimeSeries};
///
/// let t1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let temp = |v: f64| TimeSeries::from_rows(vec!["temp".to_string()], vec![(t1, vec![Some(v)])]);
/// let stations = vec![
///     StationSeries { station_code: "A".into(), weight: 0.6, series: temp(10.0) },
///     StationSeries { station_code: "B".into(), weight: 0.4, series: temp(20.0) },
/// ];
///
/// let table = aggregate(&stations, true, GlobalPolicy::PartialSum).unwrap();
/// assert_eq!(table.column_names(), ["temp_A", "temp_B", "temp_global"]);
/// assert!((table.value(&t1, "temp_global").unwrap() - 14.0).abs() < 1e-12);
/// ```
pub fn aggregate(
    stations: &[StationSeries],
    compute_global: bool,
    policy: GlobalPolicy,
) -> Result<MergedTable, AggregateError> {
    let global = compute_global.then(|| weighted_global(stations, policy));

    let labelled = stations
        .iter()
        .map(|s| (s.station_code.as_str(), &s.series))
        .chain(global.as_ref().map(|g| (GLOBAL_LABEL, g)));

    merge_series(labelled)
}
