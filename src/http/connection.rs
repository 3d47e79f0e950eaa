//! HTTP connections derived from a configuration.
//!
//! # Responsibilities
//! - Hold the `reqwest` client with the fixed JSON content type
//! - Join the `/v2/` base address with operation paths and query pairs
//! - Apply HTTP Basic credentials to outgoing requests
//!
//! # Design Decisions
//! - The base URL is kept unvalidated; malformed or missing values surface
//!   when the first request is built, not at configuration time
//! - Cloning is cheap, the underlying client is reference-counted

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use url::Url;

use crate::error::Result;

/// A configured connection to one Data Plane API endpoint.
#[derive(Debug, Clone)]
pub struct Connection {
    client: Client,
    base: Option<String>,
    basic_user: Option<String>,
    basic_password: Option<String>,
}

impl Connection {
    /// Derive a connection from resolved configuration attributes.
    pub(crate) fn new(
        url: Option<String>,
        basic_user: Option<String>,
        basic_password: Option<String>,
    ) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .expect("failed to build reqwest client");

        Self {
            client,
            base: url,
            basic_user,
            basic_password,
        }
    }

    /// Absolute URL for an API path under the `/v2/` prefix, with the given
    /// query pairs appended.
    pub fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let base = format!("{}/v2/", self.base.as_deref().unwrap_or_default());
        let mut url = Url::parse(&base)?.join(path)?;

        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }

        Ok(url)
    }

    /// Start a request on this connection with basic auth applied.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);

        match &self.basic_user {
            Some(user) => builder.basic_auth(user, self.basic_password.as_deref()),
            None => builder,
        }
    }
}
