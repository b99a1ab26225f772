//! The main entry point: download every configured station and merge the
//! results into one table.

use crate::aggregate::aggregator::{aggregate, StationSeries};
use crate::aggregate::merged_table::MergedTable;
use crate::catalog::file_selector::select_files;
use crate::catalog::find_station_item;
use crate::catalog::stac_client::StacCatalog;
use crate::catalog::Catalog;
use crate::config::{Config, STATION_WEIGHTS};
use crate::error::SwissMeteoError;
use crate::export::write_station_weights;
use crate::stations::registry::StationRegistry;
use crate::stations::weights::compute_weights;
use crate::types::frequency::Frequency;
use crate::types::station::WeightedStation;
use crate::types::time_series::TimeSeries;
use crate::weather_data::fetcher::fetch_series;
use crate::weather_data::variables::VariableMap;
use bon::bon;
use chrono::NaiveDate;
use futures_util::{stream, StreamExt};
use log::{info, warn};

/// Client tying a [`StationRegistry`] to a [`Catalog`].
///
/// [`SwissMeteo::new`] uses the Swiss registry and the MeteoSwiss STAC API.
/// [`SwissMeteo::with_catalog`] accepts any registry and catalog.
///
/// # Examples
///
/// ```no_run
/// # use swissmeteo::{Config, Frequency, SwissMeteo, SwissMeteoError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), SwissMeteoError> {
/// let config = Config::builder().frequency(Frequency::Daily).build();
/// let client = SwissMeteo::new(&config)?;
/// let table = client.load_meteo_file(&config).await?;
/// println!("{} rows, {} columns", table.height(), table.width());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SwissMeteo<C = StacCatalog> {
    registry: StationRegistry,
    catalog: C,
}

impl SwissMeteo<StacCatalog> {
    /// Creates a client for the Swiss stations, with the request timeout taken
    /// from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SwissMeteoError::Catalog`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, SwissMeteoError> {
        Ok(Self {
            registry: StationRegistry::swiss(),
            catalog: StacCatalog::new(config.request_timeout())?,
        })
    }
}

#[bon]
impl<C: Catalog> SwissMeteo<C> {
    pub fn with_catalog(registry: StationRegistry, catalog: C) -> Self {
        Self { registry, catalog }
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Fetches the series of a single station.
    ///
    /// This method uses a builder pattern.
    ///
    /// * `.station(&str)`: **Required.** Station code, e.g. `"BER"`.
    /// * `.frequency(Frequency)`: **Required.**
    /// * `.start(NaiveDate)` / `.end(NaiveDate)`: **Required.** Inclusive period.
    ///
    /// Unlike [`SwissMeteo::load_meteo_file`], a failed catalog lookup is
    /// returned as an error instead of producing an empty series. Files that
    /// fail to download are still skipped.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use swissmeteo::{Config, Frequency, SwissMeteo, SwissMeteoError};
    /// # use chrono::NaiveDate;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), SwissMeteoError> {
    /// let config = Config::builder().frequency(Frequency::Hourly).build();
    /// let client = SwissMeteo::new(&config)?;
    /// let series = client
    ///     .station_series()
    ///     .station("BER")
    ///     .frequency(Frequency::Hourly)
    ///     .start(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
    ///     .end(NaiveDate::from_ymd_opt(2023, 1, 31).unwrap())
    ///     .call()
    ///     .await?;
    /// println!("{} hourly rows", series.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn station_series(
        &self,
        station: &str,
        frequency: Frequency,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TimeSeries, SwissMeteoError> {
        let item = find_station_item(&self.catalog, station).await?;
        let files = select_files(&item.assets, frequency, start, end);
        info!("Selected {} files for station {}", files.len(), station);
        let variables = VariableMap::for_frequency(frequency);
        Ok(fetch_series(&self.catalog, station, &files, &variables, start, end).await)
    }

    /// Downloads every registry station and merges them into one table.
    ///
    /// Weights are computed before any request is made, so an invalid registry
    /// fails without touching the network. Stations are fetched concurrently, at
    /// most `max_concurrent_stations` at a time; a station whose lookup fails
    /// contributes no columns. After merging, the station weights are written to
    /// the [`STATION_WEIGHTS`] save path; a failed write is logged and does not
    /// discard the table.
    ///
    /// # Errors
    ///
    /// * [`SwissMeteoError::Configuration`] for an invalid config or registry.
    /// * [`SwissMeteoError::Aggregate`] if two columns end up with the same name.
    pub async fn load_meteo_file(&self, config: &Config) -> Result<MergedTable, SwissMeteoError> {
        config.validate()?;
        let weights = compute_weights(&self.registry)?;
        let variables = VariableMap::for_frequency(config.frequency());
        info!("Loading {} stations: {}", weights.len(), config);

        let stations: Vec<StationSeries> = stream::iter(&weights)
            .map(|weighted| self.load_station(weighted, config, &variables))
            .buffered(config.max_concurrent_stations())
            .collect()
            .await;

        let table = aggregate(&stations, config.global_meteo(), config.global_policy())?;
        info!(
            "Merged table has {} rows and {} columns",
            table.height(),
            table.width()
        );

        if let Some(path) = config.get_path(STATION_WEIGHTS) {
            if let Err(e) = write_station_weights(&weights, path).await {
                warn!("Could not write station weights to {}: {}", path.display(), e);
            }
        }
        Ok(table)
    }

    async fn load_station(
        &self,
        weighted: &WeightedStation,
        config: &Config,
        variables: &VariableMap,
    ) -> StationSeries {
        let code = weighted.code();
        let series = match find_station_item(&self.catalog, code).await {
            Ok(item) => {
                let files = select_files(
                    &item.assets,
                    config.frequency(),
                    config.start_date(),
                    config.end_date(),
                );
                if files.is_empty() {
                    warn!("No {} files in period for station {}", config.frequency(), code);
                }
                fetch_series(
                    &self.catalog,
                    code,
                    &files,
                    variables,
                    config.start_date(),
                    config.end_date(),
                )
                .await
            }
            Err(e) => {
                warn!("Skipping station {}: {}", code, e);
                TimeSeries::default()
            }
        };
        StationSeries {
            station_code: code.to_string(),
            weight: weighted.weight,
            series,
        }
    }
}

/// Downloads and merges the Swiss stations with the default STAC catalog.
///
/// Shorthand for [`SwissMeteo::new`] followed by [`SwissMeteo::load_meteo_file`].
pub async fn load_meteo_file(config: &Config) -> Result<MergedTable, SwissMeteoError> {
    SwissMeteo::new(config)?.load_meteo_file(config).await
}
