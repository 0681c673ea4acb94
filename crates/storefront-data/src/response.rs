//! HTTP response handling and the listing envelope.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

const DEFAULT_FAILURE: &str = "Failed to load";

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get a header value, case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        let key_lower = key.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == key_lower)
            .map(|(_, v)| v.as_str())
    }

    /// Unwrap the `{ ok, data, message }` envelope.
    ///
    /// A non-2xx status or `ok: false` is an error carrying the server's
    /// `message` (or `error`). A successful envelope whose `data` is not an
    /// array yields an empty list.
    pub fn envelope(&self) -> Result<Vec<Value>, FetchError> {
        let body: Value = if self.body.is_empty() {
            Value::Null
        } else {
            self.json().unwrap_or(Value::Null)
        };

        let rejected = body.get("ok").and_then(Value::as_bool) == Some(false);
        if !self.is_success() || rejected {
            return Err(FetchError::HttpError {
                status: self.status,
                message: failure_message(&body),
            });
        }

        Ok(match body.get("data") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        })
    }
}

fn failure_message(body: &Value) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_FAILURE)
        .to_string()
}
