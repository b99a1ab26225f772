//! Access to the remote data catalog: the [`Catalog`] trait the pipeline is
//! written against, the default STAC implementation, and the file selection
//! logic applied to catalog assets.

pub mod error;
pub mod file_selector;
pub mod stac_client;

#[cfg(test)]
pub(crate) mod memory;

use crate::catalog::error::CatalogError;
use std::future::Future;

/// One downloadable file of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogAsset {
    /// Asset key, which is also the file name (e.g. `ogd-smn_ber_h_historical_2020-2029.csv`).
    pub key: String,
    pub href: String,
}

/// A catalog item. MeteoSwiss publishes one item per station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: String,
    /// Assets in the order the catalog lists them.
    pub assets: Vec<CatalogAsset>,
}

/// The remote side of the pipeline: find a station's files and download them.
pub trait Catalog {
    /// Searches the catalog, returning at most `limit` items.
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<CatalogItem>, CatalogError>> + Send;

    /// Downloads the raw bytes behind `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, CatalogError>> + Send;
}

/// Number of items requested when searching for a station.
pub const SEARCH_LIMIT: usize = 10;

/// Looks up the catalog item of `station_code`.
///
/// The first item returned by the search must carry the requested station code,
/// otherwise the search is treated as failed rather than silently using the data
/// of another station.
pub async fn find_station_item<C: Catalog>(
    catalog: &C,
    station_code: &str,
) -> Result<CatalogItem, CatalogError> {
    let query = station_code.to_lowercase();
    let items = catalog.search(&query, SEARCH_LIMIT).await?;
    let item = items
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::NoItems(station_code.to_string()))?;

    if !item.id.eq_ignore_ascii_case(station_code) {
        return Err(CatalogError::StationMismatch {
            requested: station_code.to_string(),
            found: item.id,
        });
    }
    Ok(item)
}
