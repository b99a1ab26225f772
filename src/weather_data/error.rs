use crate::catalog::error::CatalogError;
use polars::error::PolarsError;
use thiserror::Error;

/// A single observation file could not be turned into rows. The file is skipped.
#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Download of '{file}' failed")]
    Download {
        file: String,
        #[source]
        source: CatalogError,
    },

    #[error("Parsing error processing CSV file '{file}'")]
    CsvReadPolars {
        file: String,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in file '{file}'")]
    MissingColumnError { file: String, column: String },

    #[error("Failed Polars column operation for file '{file}': {source}")]
    ColumnOperationError { file: String, source: PolarsError },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
