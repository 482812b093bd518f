//! Where the catalog comes from.

use std::path::PathBuf;

use async_trait::async_trait;
use loja_data::FetchClient;
use serde_json::Value;

use crate::catalog::Product;
use crate::error::CatalogError;

/// Default location of the catalog, relative to the storefront root.
pub const DEFAULT_CATALOG_PATH: &str = "assets/data/products.json";

/// A read-only supplier of catalog snapshots.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch and parse the full product list.
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Catalog read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CatalogError::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        parse_catalog(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Catalog fetched over HTTP, bypassing caches.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: FetchClient,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(FetchClient::new(), url)
    }

    pub fn with_client(client: FetchClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .client
            .get(self.url.as_str())
            .accept("application/json")
            .no_cache()
            .send()
            .await?
            .error_for_status()?;
        parse_catalog(response.bytes())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Pick the source for a configured location: `http(s)://` URLs are fetched,
/// anything else is a file path.
pub fn catalog_source_for(location: &str) -> Box<dyn CatalogSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpCatalogSource::new(location))
    } else {
        Box::new(FileCatalogSource::new(location))
    }
}

/// Parse a catalog body.
///
/// The body must be a JSON array. Records that are not valid products are
/// skipped with a warning; the rest are kept in order.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<Product>, CatalogError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| CatalogError::Malformed(e.to_string()))?;

    let Value::Array(records) = value else {
        return Err(CatalogError::Malformed(
            "expected a JSON array of products".to_string(),
        ));
    };

    let mut products = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Product>(record) {
            Ok(product) => products.push(product),
            Err(e) => tracing::warn!(index, error = %e, "skipping invalid catalog record"),
        }
    }
    Ok(products)
}
