//! Catalog loading
//!
//! Fetches the product list once at startup. Any failure is logged and
//! replaced with the built-in fallback catalog, so startup never fails here.

use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;

use super::models::{fallback_products, Product};

/// Reasons the remote catalog could not be used.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog source answered with status {0}")]
    Status(u16),

    #[error("catalog body is not a JSON array of objects: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parses a catalog body into normalized products.
pub fn parse_catalog(body: &str) -> Result<Vec<Product>, CatalogError> {
    let records: Vec<Map<String, Value>> = serde_json::from_str(body)?;
    Ok(records
        .iter()
        .enumerate()
        .map(|(index, record)| Product::from_record(index, record))
        .collect())
}

/// Downloads and parses the catalog at `url`, giving up after `timeout`.
pub async fn fetch_catalog(url: &str, timeout: Duration) -> Result<Vec<Product>, CatalogError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    parse_catalog(&body)
}

/// Loads the catalog, substituting the fallback list on any error.
pub async fn load_catalog(url: &str, timeout: Duration) -> Vec<Product> {
    match fetch_catalog(url, timeout).await {
        Ok(products) => {
            tracing::info!(count = products.len(), "catalog loaded");
            products
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                url,
                "failed to load remote products, using fallback catalog"
            );
            fallback_products()
        }
    }
}
