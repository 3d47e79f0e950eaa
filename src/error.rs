//! Crate-wide error definitions.

use thiserror::Error;

/// Errors surfaced by the Data Plane API client.
///
/// Remote application errors (non-2xx statuses) are not represented here;
/// they come back to the caller as ordinary [`Response`](crate::Response)
/// values carrying the remote status code and JSON body.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was empty. Raised before any network activity.
    #[error("`{0}` should be present but was empty")]
    MissingArgument(&'static str),

    /// A setter was called on a configuration that has been frozen.
    #[error("configuration is frozen and can no longer be modified")]
    FrozenConfiguration,

    /// The endpoint URL could not be built from the resolved base URL.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The underlying HTTP layer failed (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type for Data Plane API operations.
pub type Result<T> = std::result::Result<T, Error>;
