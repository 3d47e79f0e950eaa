//! Runtime server endpoints of the Data Plane API.
//!
//! # Responsibilities
//! - Build paths and query parameters for the runtime server endpoints
//! - Validate required arguments before any network activity
//! - Issue the request with the configuration-resolved timeout
//! - Log the request/response pair as one debug record
//!
//! # Design Decisions
//! - Non-2xx remote statuses are returned as data, never as errors
//! - The debug record is emitted only once a response exists; transport
//!   failures (including timeouts) produce no record
//! - A true mock flag short-circuits before any socket work

mod types;

pub use types::{AdminState, OperationalState, RuntimeServer};

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use url::Url;

use crate::config::{global, Configuration, Logger};
use crate::error::{Error, Result};
use crate::http::Response;

/// Read the runtime settings of servers under `backend`.
///
/// With `name` absent the collection endpoint is targeted and the response
/// body is a JSON array; with `name` present a single server object comes
/// back. `config` falls back to the process-wide root when omitted.
pub async fn get_runtime_settings(
    backend: &str,
    name: Option<&str>,
    config: Option<&Configuration>,
) -> Result<Response> {
    if backend.is_empty() {
        return Err(Error::MissingArgument("backend"));
    }

    let path = match name {
        Some(name) => format!("services/haproxy/runtime/servers/{name}"),
        None => String::from("services/haproxy/runtime/servers"),
    };

    send_request(Method::GET, &path, backend, None, config).await
}

/// Update the transient settings of server `name` under `backend`.
///
/// `settings` is JSON-encoded as the request body, e.g.
/// `{"admin_state": "drain"}`. The remote returns the updated server object.
pub async fn update_transient_settings<S: Serialize>(
    backend: &str,
    name: &str,
    settings: &S,
    config: Option<&Configuration>,
) -> Result<Response> {
    if backend.is_empty() {
        return Err(Error::MissingArgument("backend"));
    }
    if name.is_empty() {
        return Err(Error::MissingArgument("name"));
    }

    let body = serde_json::to_value(settings)?;
    let path = format!("services/haproxy/runtime/servers/{name}");

    send_request(Method::PUT, &path, backend, Some(body), config).await
}

async fn send_request(
    method: Method,
    path: &str,
    backend: &str,
    body: Option<Value>,
    config: Option<&Configuration>,
) -> Result<Response> {
    let fallback;
    let config = match config {
        Some(config) => config,
        None => {
            fallback = global();
            fallback.as_ref()
        }
    };

    let connection = config.connection();
    let url = connection.endpoint(path, &[("backend", backend)])?;

    let response = if config.is_mock() {
        Response::mocked()
    } else {
        let mut request = connection.request(method.clone(), url.clone());
        if let Some(timeout) = config.timeout() {
            request = request.timeout(timeout);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        Response::read(request.send().await?).await?
    };

    log_communication(&method, &url, backend, body.as_ref(), &response, config.logger());

    Ok(response)
}

/// Emit the request/response pair as one human-readable debug record.
fn log_communication(
    method: &Method,
    url: &Url,
    backend: &str,
    body: Option<&Value>,
    response: &Response,
    logger: Option<Logger>,
) {
    let Some(logger) = logger else { return };

    let request_record = json!({
        "method": method.as_str(),
        "url": url.as_str(),
        "params": { "backend": backend },
        // Credentials are not reproduced in the record.
        "headers": { "Content-Type": "application/json" },
        "body": body,
    });
    let response_record = json!({
        "status": response.status.as_u16(),
        "body": response.body,
        "headers": headers_record(&response.headers),
    });

    logger.debug(&format!(
        "HAProxy {method} {url}\n-----REQUEST-----\n{}\n-----RESPONSE-----\n{}",
        pretty(&request_record),
        pretty(&response_record),
    ));
}

fn headers_record(headers: &reqwest::header::HeaderMap) -> Value {
    let map = headers
        .iter()
        .map(|(name, value)| {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            (name.as_str().to_owned(), Value::String(value))
        })
        .collect::<serde_json::Map<String, Value>>();

    Value::Object(map)
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
