//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! configure(|root| ...)            ad-hoc Configuration::builder()
//!     → global root (singleton)        → child instance
//!                ▲                          │ unset attribute?
//!                └──────────────────────────┘ delegate to parent chain
//!
//! Configuration::connection()
//!     → cached connection after freeze()
//!     → freshly derived connection before
//! ```
//!
//! # Design Decisions
//! - The root is created lazily, once per process, with guaranteed logger
//!   and timeout defaults
//! - Children hold an explicit `Arc` handle to their parent, never an
//!   implicit global lookup
//! - `freeze` pins the connection and rejects later writes

mod configuration;
mod logger;

pub use configuration::{Configuration, ConfigurationBuilder};
pub use logger::Logger;

use std::sync::{Arc, LazyLock};

use crate::error::Result;

/// Process-wide root of every delegation chain.
static CONFIG: LazyLock<Arc<Configuration>> =
    LazyLock::new(|| Arc::new(Configuration::global_root()));

/// Handle to the process-wide root configuration.
pub fn global() -> Arc<Configuration> {
    Arc::clone(&CONFIG)
}

/// Mutate the process-wide root configuration in place.
///
/// Meant to be called once at startup, before any requests are issued:
///
/// ```no_run
/// # fn main() -> dataplane_api::Result<()> {
/// dataplane_api::configure(|config| {
///     config.set_url("http://10.0.2.5:5555")?;
///     config.set_basic_user("admin")?;
///     config.set_basic_password("s3cr3t")
/// })?;
/// # Ok(())
/// # }
/// ```
pub fn configure<F>(f: F) -> Result<Arc<Configuration>>
where
    F: FnOnce(&Configuration) -> Result<()>,
{
    let config = global();
    f(&config)?;
    Ok(config)
}
