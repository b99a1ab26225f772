//! [`Catalog`] implementation for the MeteoSwiss STAC API on data.geo.admin.ch.

use crate::catalog::error::CatalogError;
use crate::catalog::{Catalog, CatalogAsset, CatalogItem};
use log::{info, warn};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

/// Items endpoint of the automatic weather station collection (SwissMetNet).
pub const SMN_ITEMS_URL: &str =
    "https://data.geo.admin.ch/api/stac/v1/collections/ch.meteoschweiz.ogd-smn/items";

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    id: String,
    // `preserve_order` keeps the assets in catalog order.
    #[serde(default)]
    assets: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    href: String,
}

impl From<Feature> for CatalogItem {
    fn from(feature: Feature) -> Self {
        let assets = feature
            .assets
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value::<Asset>(value) {
                Ok(asset) => Some(CatalogAsset {
                    key,
                    href: asset.href,
                }),
                Err(e) => {
                    warn!("Ignoring asset '{}' of item '{}': {}", key, feature.id, e);
                    None
                }
            })
            .collect();
        CatalogItem {
            id: feature.id,
            assets,
        }
    }
}

/// HTTP client for a STAC items endpoint.
///
/// Every request is bounded by the timeout given at construction.
#[derive(Debug, Clone)]
pub struct StacCatalog {
    items_url: String,
    client: Client,
}

impl StacCatalog {
    /// Creates a client for the SwissMetNet collection.
    pub fn new(timeout: Duration) -> Result<Self, CatalogError> {
        Self::with_items_url(SMN_ITEMS_URL, timeout)
    }

    /// Creates a client for any STAC items endpoint.
    pub fn with_items_url(items_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CatalogError::ClientBuild)?;
        Ok(Self {
            items_url: items_url.to_string(),
            client,
        })
    }

    async fn get(&self, request: reqwest::RequestBuilder, url: &str) -> Result<Response, CatalogError> {
        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::NetworkRequest(url.to_string(), e))?;

        match response.error_for_status() {
            Ok(resp) => Ok(resp),
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                Err(if let Some(status) = e.status() {
                    CatalogError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    CatalogError::NetworkRequest(url.to_string(), e)
                })
            }
        }
    }
}

impl Catalog for StacCatalog {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogItem>, CatalogError> {
        info!("Searching {} for '{}'", self.items_url, query);
        let limit = limit.to_string();
        let request = self
            .client
            .get(&self.items_url)
            .query(&[("q", query), ("limit", limit.as_str())]);
        let response = self.get(request, &self.items_url).await?;

        let collection: FeatureCollection = response
            .json()
            .await
            .map_err(|e| CatalogError::JsonParse(self.items_url.clone(), e))?;
        Ok(collection.features.into_iter().map(CatalogItem::from).collect())
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        info!("Downloading data from {}", url);
        let response = self.get(self.client.get(url), url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CatalogError::NetworkRequest(url.to_string(), e))?;
        Ok(bytes.to_vec())
    }
}
