//! Client for a subset of the HAProxy Data Plane API (v2).
//!
//! Covers the runtime server endpoints: reading the runtime settings of the
//! servers under a backend and updating a server's transient settings (its
//! `admin_state` in particular). Connection settings live in a layered
//! [`Configuration`]: a process-wide root holds the defaults and ad-hoc
//! child instances override any subset of them, delegating the rest upward.
//!
//! ```no_run
//! use dataplane_api::{configure, server};
//!
//! # async fn run() -> dataplane_api::Result<()> {
//! configure(|config| {
//!     config.set_url("http://10.0.2.5:5555")?;
//!     config.set_basic_user("admin")?;
//!     config.set_basic_password("s3cr3t")
//! })?;
//!
//! // All servers under the `ingress` backend.
//! let response = server::get_runtime_settings("ingress", None, None).await?;
//! println!("{}", response.body);
//!
//! // Drain one of them.
//! let settings = serde_json::json!({ "admin_state": server::AdminState::Drain });
//! server::update_transient_settings("ingress", "web1", &settings, None).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod server;

pub use config::{configure, global, Configuration, ConfigurationBuilder, Logger};
pub use error::{Error, Result};
pub use http::{Connection, Response};
