//! In-memory [`Catalog`] used by the tests in place of the STAC server.

use crate::catalog::error::CatalogError;
use crate::catalog::{Catalog, CatalogAsset, CatalogItem};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct MemoryCatalog {
    items: HashMap<String, Vec<CatalogItem>>,
    files: HashMap<String, Vec<u8>>,
}

fn latin1(body: &str) -> Vec<u8> {
    body.chars().map(|c| c as u32 as u8).collect()
}

impl MemoryCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers an item `id` whose files have the given keys and bodies. The
    /// bodies are stored Latin-1 encoded.
    pub(crate) fn with_item(mut self, id: &str, files: &[(&str, &str)]) -> Self {
        let mut assets = Vec::new();
        for (key, body) in files {
            let href = format!("mem://{id}/{key}");
            self.files.insert(href.clone(), latin1(body));
            assets.push(CatalogAsset {
                key: key.to_string(),
                href,
            });
        }
        self.items.entry(id.to_lowercase()).or_default().push(CatalogItem {
            id: id.to_string(),
            assets,
        });
        self
    }

    /// Registers a file that is listed for item `id` but cannot be downloaded.
    pub(crate) fn with_broken_file(mut self, id: &str, key: &str) -> Self {
        let asset = CatalogAsset {
            key: key.to_string(),
            href: format!("mem://{id}/{key}/missing"),
        };
        match self.items.get_mut(&id.to_lowercase()).and_then(|v| v.first_mut()) {
            Some(item) => item.assets.push(asset),
            None => {
                self.items.insert(
                    id.to_lowercase(),
                    vec![CatalogItem {
                        id: id.to_string(),
                        assets: vec![asset],
                    }],
                );
            }
        }
        self
    }

    /// Makes a search for `query` answer with an item named `item_id`.
    pub(crate) fn with_search_result(mut self, query: &str, item_id: &str) -> Self {
        self.items.entry(query.to_lowercase()).or_default().push(CatalogItem {
            id: item_id.to_string(),
            assets: Vec::new(),
        });
        self
    }
}

impl Catalog for MemoryCatalog {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self
            .items
            .get(&query.to_lowercase())
            .map(|items| items.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownFile(url.to_string()))
    }
}
