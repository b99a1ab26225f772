//! Writing results to disk: the merged table as Parquet and the station
//! weights as CSV. Writes run on a blocking thread.

use crate::error::SwissMeteoError;
use crate::types::station::WeightedStation;
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::task;

async fn ensure_parent_dir(path: &Path) -> Result<(), SwissMeteoError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| SwissMeteoError::OutputDirCreation(parent.to_path_buf(), e)),
        _ => Ok(()),
    }
}

pub(crate) async fn write_parquet(mut df: DataFrame, path: &Path) -> Result<(), SwissMeteoError> {
    ensure_parent_dir(path).await?;
    let path_buf = path.to_path_buf();
    task::spawn_blocking(move || {
        let file = std::fs::File::create(&path_buf)
            .map_err(|e| SwissMeteoError::WriteIo(path_buf.clone(), e))?;
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .finish(&mut df)
            .map_err(|e| SwissMeteoError::WritePolars(path_buf, e))?;
        Ok::<(), SwissMeteoError>(())
    })
    .await??;
    info!("Wrote {}", path.display());
    Ok(())
}

/// The station weights as a `DataFrame` with columns `name, station_id,
/// canton, population, district, canton_pop, weight`.
pub fn station_weights_frame(weights: &[WeightedStation]) -> PolarsResult<DataFrame> {
    let name: Vec<&str> = weights.iter().map(|w| w.station.name.as_str()).collect();
    let code: Vec<&str> = weights.iter().map(|w| w.station.code.as_str()).collect();
    let canton: Vec<&str> = weights.iter().map(|w| w.station.canton.as_str()).collect();
    let population: Vec<Option<u64>> = weights.iter().map(|w| w.station.population).collect();
    let district: Vec<Option<u64>> = weights
        .iter()
        .map(|w| w.station.district_population)
        .collect();
    let canton_pop: Vec<Option<u64>> = weights
        .iter()
        .map(|w| w.station.canton_population)
        .collect();
    let weight: Vec<f64> = weights.iter().map(|w| w.weight).collect();

    DataFrame::new(vec![
        Column::new("name".into(), name),
        Column::new("station_id".into(), code),
        Column::new("canton".into(), canton),
        Column::new("population".into(), population),
        Column::new("district".into(), district),
        Column::new("canton_pop".into(), canton_pop),
        Column::new("weight".into(), weight),
    ])
}

/// Writes the station weights to a CSV file, creating the parent directory if
/// needed.
pub async fn write_station_weights(
    weights: &[WeightedStation],
    path: &Path,
) -> Result<(), SwissMeteoError> {
    let mut df = station_weights_frame(weights)?;
    ensure_parent_dir(path).await?;
    let path_buf: PathBuf = path.to_path_buf();
    task::spawn_blocking(move || {
        let mut file = std::fs::File::create(&path_buf)
            .map_err(|e| SwissMeteoError::WriteIo(path_buf.clone(), e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| SwissMeteoError::WritePolars(path_buf, e))?;
        Ok::<(), SwissMeteoError>(())
    })
    .await??;
    info!("Wrote station weights to {}", path.display());
    Ok(())
}
