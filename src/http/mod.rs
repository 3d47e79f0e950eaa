//! HTTP plumbing shared by the API operations.
//!
//! # Data Flow
//! ```text
//! Configuration (resolved url + credentials)
//!     → connection.rs (reqwest client, base address, basic auth)
//!     → request sent by the operation modules
//!     → response.rs (status + parsed JSON body + headers snapshot)
//!     → returned to the caller and logged
//! ```

mod connection;
mod response;

pub use connection::Connection;
pub use response::Response;
