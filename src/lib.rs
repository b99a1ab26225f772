//! Download historic MeteoSwiss station observations from the STAC catalog on
//! data.geo.admin.ch and merge them into one wide table, optionally with a
//! population-weighted national series.
//!
//! ```no_run
//! use swissmeteo::{load_meteo_file, Config, Frequency, SwissMeteoError};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), SwissMeteoError> {
//! let config = Config::builder()
//!     .frequency(Frequency::Daily)
//!     .global_meteo(true)
//!     .build();
//! let table = load_meteo_file(&config).await?;
//! println!("{:?}", table.column_names());
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod catalog;
mod config;
mod error;
mod export;
mod stations;
mod swiss_meteo;
mod types;
mod weather_data;

pub use error::SwissMeteoError;
pub use swiss_meteo::*;

pub use config::error::ConfigurationError;
pub use config::{Config, SavePaths, SAVE_DIRECTORY, STATION_WEIGHTS};

pub use types::frequency::Frequency;
pub use types::station::*;
pub use types::time_series::TimeSeries;

pub use stations::registry::StationRegistry;
pub use stations::weights::compute_weights;

pub use catalog::error::CatalogError;
pub use catalog::file_selector::select_files;
pub use catalog::stac_client::{StacCatalog, SMN_ITEMS_URL};
pub use catalog::{find_station_item, Catalog, CatalogAsset, CatalogItem, SEARCH_LIMIT};

pub use weather_data::error::WeatherDataError;
pub use weather_data::fetcher::fetch_series;
pub use weather_data::parser::parse_timestamp;
pub use weather_data::variables::{Variable, VariableMap};

pub use aggregate::aggregator::{
    aggregate, merge_series, weighted_global, GlobalPolicy, StationSeries, GLOBAL_LABEL,
};
pub use aggregate::error::AggregateError;
pub use aggregate::merged_table::{MergedColumn, MergedTable, DATETIME_COLUMN};

pub use export::{station_weights_frame, write_station_weights};
