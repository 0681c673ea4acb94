//! HTTP client for the storefront product-listing service.
//!
//! Provides a small builder API over `reqwest` (native) and Spin's outbound
//! HTTP (`wasm32`), the `{ ok, data, message }` envelope decoding used by
//! every listing endpoint, and [`ProductFeed`], which makes sure a slow,
//! stale fetch can never overwrite the result of a newer one.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::{CatalogClient, ProductFeed, ProductQuery};
//!
//! let client = CatalogClient::new("http://localhost:5000");
//! let mut feed = ProductFeed::new();
//!
//! let ticket = feed.begin();
//! let result = client.list_products(&ProductQuery::new().with_search("honey")).await;
//! feed.complete(ticket, result);
//! ```

mod catalog;
mod error;
mod feed;
mod query;
mod request;
mod response;

pub use catalog::CatalogClient;
pub use error::FetchError;
pub use feed::{FetchTicket, ProductFeed};
pub use query::{ProductQuery, DEFAULT_LIMIT};
pub use request::{Method, RequestBuilder};
pub use response::Response;

use std::collections::HashMap;
use std::time::Duration;

/// HTTP client for making outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Option<Duration>,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            timeout: None,
            #[cfg(not(target_arch = "wasm32"))]
            http: reqwest::Client::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Apply a timeout to every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        ClientRequestBuilder { client: self, builder }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl<'a> ClientRequestBuilder<'a> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Append several query parameters.
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.builder = self.builder.query_pairs(pairs);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// The request as built so far.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and return the response.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn send(self) -> Result<Response, FetchError> {
        let method = match self.builder.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut request = self.client.http.request(method, self.builder.url());
        for (key, value) in &self.builder.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(timeout) = self.builder.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = self.builder.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, headers, body))
    }

    /// Send the request and return the response.
    #[cfg(target_arch = "wasm32")]
    pub async fn send(self) -> Result<Response, FetchError> {
        use spin_sdk::http::{Method as SpinMethod, Request};

        let method = match self.builder.method {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
            Method::Put => SpinMethod::Put,
            Method::Patch => SpinMethod::Patch,
            Method::Delete => SpinMethod::Delete,
        };

        let mut request = Request::builder();
        request.method(method);
        request.uri(self.builder.url());
        for (key, value) in &self.builder.headers {
            request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = self.builder.body {
            request.body(body);
        }

        let response: spin_sdk::http::Response = spin_sdk::http::send(request.build())
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = *response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
            .collect();
        let body = response.into_body();

        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CatalogClient, FetchClient, FetchError, ProductFeed, ProductQuery, Response};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_prefixes_relative_paths() {
        let client = FetchClient::new().with_base_url("http://localhost:5000/");
        let req = client.get("/api/products");
        assert_eq!(req.request().url(), "http://localhost:5000/api/products");
    }

    #[test]
    fn test_absolute_url_kept() {
        let client = FetchClient::new().with_base_url("http://localhost:5000");
        let req = client.get("https://cdn.example.com/feed");
        assert_eq!(req.request().url(), "https://cdn.example.com/feed");
    }

    #[test]
    fn test_default_headers_and_timeout() {
        let client = FetchClient::new()
            .with_default_header("Accept", "application/json")
            .with_timeout(Duration::from_secs(3));
        let req = client.post("/api/regions");
        assert_eq!(req.request().method(), Method::Post);
        assert_eq!(
            req.request().headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(req.request().timeout, Some(Duration::from_secs(3)));
    }
}
