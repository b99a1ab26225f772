use thiserror::Error;

/// The remote catalog or one of its files could not be used. Never fatal for a
/// whole run: the affected station or file is skipped.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode catalog response from {0}")]
    JsonParse(String, #[source] reqwest::Error),

    #[error("No catalog item found for station '{0}'")]
    NoItems(String),

    #[error("Catalog returned item '{found}' when searching for station '{requested}'")]
    StationMismatch { requested: String, found: String },

    #[cfg(test)]
    #[error("No file named '{0}' in the catalog")]
    UnknownFile(String),
}
