//! Typed access to the listing endpoints.

use crate::{FetchClient, FetchError, ProductQuery};
use serde_json::Value;
use std::time::Duration;
use storefront_catalog::catalog::{Category, ProductRecord};
use storefront_catalog::region::Region;
use tracing::{debug, warn};

const PRODUCTS_PATH: &str = "/api/products";
const REGIONS_PATH: &str = "/api/regions";
const CATEGORIES_PATH: &str = "/api/categories";

/// Client for the product, region and category listings.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: FetchClient,
    token: Option<String>,
}

impl CatalogClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(
            FetchClient::new()
                .with_base_url(base_url)
                .with_default_header("Accept", "application/json"),
        )
    }

    pub fn with_client(http: FetchClient) -> Self {
        Self { http, token: None }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    /// Send a bearer token with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.http.base_url()
    }

    /// Fetch products matching `query`.
    ///
    /// Records are decoded leniently: malformed fields default instead of
    /// failing the whole listing.
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<ProductRecord>, FetchError> {
        let items = self.fetch_list(PRODUCTS_PATH, query.to_params()).await?;
        let records: Vec<ProductRecord> = items.iter().map(ProductRecord::from_value).collect();
        debug!(count = records.len(), "products fetched");
        Ok(records)
    }

    /// Fetch regions. Entries that are not region documents are skipped.
    pub async fn list_regions(&self) -> Result<Vec<Region>, FetchError> {
        let items = self.fetch_list(REGIONS_PATH, Vec::new()).await?;
        Ok(decode_regions(items))
    }

    /// Find a region by slug among the listed regions.
    pub async fn find_region(&self, slug: &str) -> Result<Option<Region>, FetchError> {
        Ok(self
            .list_regions()
            .await?
            .into_iter()
            .find(|r| r.slug == slug))
    }

    /// Fetch categories. Any failure yields an empty list.
    pub async fn list_categories(&self) -> Vec<Category> {
        match self.fetch_list(CATEGORIES_PATH, Vec::new()).await {
            Ok(items) => items.iter().map(Category::from_value).collect(),
            Err(e) => {
                warn!(error = %e, "category listing unavailable");
                Vec::new()
            }
        }
    }

    async fn fetch_list(&self, path: &str, params: Vec<(String, String)>) -> Result<Vec<Value>, FetchError> {
        let mut request = self.http.get(path).query_pairs(params);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        debug!(url = %request.request().url(), "fetching listing");
        request.send().await?.envelope()
    }
}

fn decode_regions(items: Vec<Value>) -> Vec<Region> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Region>(item) {
            Ok(region) => Some(region),
            Err(e) => {
                debug!(error = %e, "skipping malformed region");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Response;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_decode_products_from_envelope() {
        let body = json!({
            "ok": true,
            "data": [
                {"_id": "a", "title": "Forest Honey", "price": "450"},
                {"_id": "b", "name": "Ghee", "price": null}
            ]
        });
        let resp = Response::new(200, HashMap::new(), serde_json::to_vec(&body).unwrap());
        let records: Vec<ProductRecord> = resp
            .envelope()
            .unwrap()
            .iter()
            .map(ProductRecord::from_value)
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price, 450.0);
        assert_eq!(records[1].price, 0.0);
    }

    #[test]
    fn test_decode_regions_skips_malformed() {
        let regions = decode_regions(vec![
            json!({"_id": "r1", "name": "Kutch", "slug": "kutch"}),
            json!("oops"),
            json!({"_id": "r2", "name": "Nilgiris", "slug": "nilgiris", "active": false}),
        ]);
        assert_eq!(regions.len(), 2);
        assert!(regions[0].active);
        assert!(!regions[1].active);
    }

    #[test]
    fn test_client_base_url() {
        let client = CatalogClient::new("http://localhost:5000").with_token("t");
        assert_eq!(client.base_url(), Some("http://localhost:5000"));
    }
}
