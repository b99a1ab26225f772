//! Chooses which catalog files of a station are needed for a request.

use crate::catalog::CatalogAsset;
use crate::types::frequency::Frequency;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

fn year_range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"_(\d{4})-(\d{4})\.csv$").expect("year range pattern is valid")
    })
}

/// Parses the `_START-END.csv` year range at the end of an asset key.
pub(crate) fn year_range(key: &str) -> Option<(i32, i32)> {
    let captures = year_range_pattern().captures(key)?;
    let start = captures.get(1)?.as_str().parse().ok()?;
    let end = captures.get(2)?.as_str().parse().ok()?;
    Some((start, end))
}

/// Selects the assets holding `frequency` data that overlap `[start, end]`.
///
/// An asset is kept when its key contains the frequency marker (`_h_`, `_d_`...),
/// is a `.csv` file, and declares a year range `START-END` with
/// `START <= end.year` and `END >= start.year`. Keys without a year range are
/// never assumed to be in range. Catalog order is preserved.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use swissmeteo::{select_files, CatalogAsset, Frequency};
///
/// let asset = |key: &str| CatalogAsset { key: key.to_string(), href: String::new() };
/// let assets = [
///     asset("ogd-smn_ber_h_historical_2010-2019.csv"),
///     asset("ogd-smn_ber_h_historical_2020-2025.csv"),
/// ];
/// let selected = select_files(
///     &assets,
///     Frequency::Hourly,
///     NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
/// );
/// assert_eq!(selected, vec![asset("ogd-smn_ber_h_historical_2020-2025.csv")]);
/// ```
pub fn select_files(
    assets: &[CatalogAsset],
    frequency: Frequency,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<CatalogAsset> {
    let marker = frequency.asset_marker();
    assets
        .iter()
        .filter(|asset| asset.key.contains(&marker) && asset.key.ends_with(".csv"))
        .filter(|asset| match year_range(&asset.key) {
            Some((first, last)) => first <= end.year() && last >= start.year(),
            None => false,
        })
        .cloned()
        .collect()
}
