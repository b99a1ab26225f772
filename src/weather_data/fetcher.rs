use crate::catalog::{Catalog, CatalogAsset};
use crate::types::time_series::TimeSeries;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::parser::{assemble, parse_file, RawFile};
use crate::weather_data::variables::VariableMap;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, info, warn};
use tokio::task;

/// First and last instant of an inclusive date window.
pub(crate) fn day_bounds(start: NaiveDate, end: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let first = start.and_time(NaiveTime::MIN);
    let last = end
        .and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or_else(|| end.and_time(NaiveTime::MIN));
    (first, last)
}

/// Downloads one file and parses it on a blocking thread.
async fn fetch_file<C: Catalog>(
    catalog: &C,
    asset: &CatalogAsset,
    variables: &VariableMap,
) -> Result<RawFile, WeatherDataError> {
    let bytes = catalog
        .fetch(&asset.href)
        .await
        .map_err(|e| WeatherDataError::Download {
            file: asset.key.clone(),
            source: e,
        })?;

    let file = asset.key.clone();
    let variables = variables.clone();
    task::spawn_blocking(move || parse_file(&bytes, &file, &variables)).await?
}

/// Builds the series of one station from its selected files.
///
/// Files are downloaded in the given order and concatenated row-wise. A file that
/// cannot be downloaded or parsed is logged and skipped; if none succeeds the
/// series is empty. The result is restricted to `[start, end]`, where `end`
/// includes the whole end day. See [`TimeSeries`] for how duplicate timestamps
/// are resolved.
pub async fn fetch_series<C: Catalog>(
    catalog: &C,
    station_code: &str,
    files: &[CatalogAsset],
    variables: &VariableMap,
    start: NaiveDate,
    end: NaiveDate,
) -> TimeSeries {
    let mut parsed = Vec::with_capacity(files.len());
    for asset in files {
        info!("Downloading {} for station {}", asset.key, station_code);
        match fetch_file(catalog, asset, variables).await {
            Ok(raw) => parsed.push(raw),
            Err(e) => warn!("Error on {} for station {}: {}", asset.key, station_code, e),
        }
    }

    if parsed.is_empty() {
        if !files.is_empty() {
            warn!("No file could be downloaded for station {}", station_code);
        }
        return TimeSeries::default();
    }

    let (series, report) = assemble(&parsed, variables);
    if report.unparseable > 0 {
        debug!(
            "Dropped {} rows with unparseable timestamps for station {}",
            report.unparseable, station_code
        );
    }
    if report.duplicates > 0 {
        debug!(
            "Dropped {} rows with duplicate timestamps for station {}",
            report.duplicates, station_code
        );
    }

    let (first, last) = day_bounds(start, end);
    let series = series.between(first, last);
    info!(
        "Concatenated {} rows ({} in period) for station {}",
        report.rows,
        series.len(),
        station_code
    );
    series
}
