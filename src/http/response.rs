//! Response snapshots returned to callers.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// A fully-read HTTP exchange result.
///
/// The Data Plane API reports application errors (including 500 "not found")
/// as normal responses; this type carries them back to the caller as data
/// with the remote status code and JSON body, never as a raised error.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: StatusCode,
    /// Body parsed as JSON. `Null` when the body was empty; the raw text
    /// when it was not valid JSON.
    pub body: Value,
    /// Response headers.
    pub headers: HeaderMap,
}

impl Response {
    /// Read a `reqwest` response to completion.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        Ok(Self {
            status,
            body: parse_body(&text),
            headers,
        })
    }

    /// Synthetic response used when mock mode suppresses network I/O.
    pub(crate) fn mocked() -> Self {
        Self {
            status: StatusCode::OK,
            body: Value::Null,
            headers: HeaderMap::new(),
        }
    }

    /// Deserialize the body into a typed model.
    pub fn parse<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.body.clone())
    }

    /// Whether the remote reported success (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}
