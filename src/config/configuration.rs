//! Layered client configuration.
//!
//! # Responsibilities
//! - Hold the optional connection settings (URL, credentials, timeout, logger, mock flag)
//! - Resolve unset attributes through the parent chain down to the global root
//! - Build the HTTP connection lazily, or eagerly and cached on freeze
//!
//! # Design Decisions
//! - Attributes are read lock-free through `arc_swap`; writers clone-and-swap
//! - Absent values stay `None` through the whole chain, never empty strings
//! - After `freeze` every setter fails with `Error::FrozenConfiguration`

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use arc_swap::ArcSwap;

use crate::config::global;
use crate::config::logger::Logger;
use crate::error::{Error, Result};
use crate::http::Connection;

/// Request timeout the global root falls back to.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The optional attribute block, swapped atomically on every write.
#[derive(Debug, Clone, Default)]
struct Attributes {
    url: Option<String>,
    basic_user: Option<String>,
    basic_password: Option<String>,
    logger: Option<Logger>,
    timeout: Option<Duration>,
    mock: Option<bool>,
}

/// Layered settings for the Data Plane API client.
///
/// Configurations form a parent-linked chain: an attribute that is not set
/// on an instance resolves to the nearest ancestor that has it, bottoming
/// out at the process-wide root returned by [`global`](crate::config::global).
/// The root guarantees a logger and a timeout, so resolution of those two
/// always yields a value; URL, credentials and the mock flag may legitimately
/// resolve to `None`.
#[derive(Debug)]
pub struct Configuration {
    attrs: ArcSwap<Attributes>,
    global: bool,
    parent: Option<Arc<Configuration>>,
    frozen: AtomicBool,
    connection: OnceLock<Connection>,
}

/// Builder for ad-hoc [`Configuration`] instances.
///
/// Every attribute is independently optional; an omitted attribute delegates
/// to the parent chain at read time rather than being defaulted here.
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    attrs: Attributes,
    parent: Option<Arc<Configuration>>,
}

impl ConfigurationBuilder {
    /// Base URL of the Data Plane API endpoint, without the `/v2/` suffix.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.attrs.url = Some(url.into());
        self
    }

    /// HTTP Basic auth username.
    pub fn basic_user(mut self, user: impl Into<String>) -> Self {
        self.attrs.basic_user = Some(user.into());
        self
    }

    /// HTTP Basic auth password.
    pub fn basic_password(mut self, password: impl Into<String>) -> Self {
        self.attrs.basic_password = Some(password.into());
        self
    }

    /// Logger the request/response records are emitted through.
    pub fn logger(mut self, logger: Logger) -> Self {
        self.attrs.logger = Some(logger);
        self
    }

    /// Request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.attrs.timeout = Some(timeout);
        self
    }

    /// Suppress real network I/O when true.
    pub fn mock(mut self, mock: bool) -> Self {
        self.attrs.mock = Some(mock);
        self
    }

    /// Explicit parent to delegate unset attributes to. Without one, the
    /// built configuration delegates to the global root.
    pub fn parent(mut self, parent: Arc<Configuration>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn build(self) -> Configuration {
        Configuration {
            attrs: ArcSwap::from_pointee(self.attrs),
            global: false,
            parent: self.parent,
            frozen: AtomicBool::new(false),
            connection: OnceLock::new(),
        }
    }
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// Construct the process-wide root.
    ///
    /// Only the singleton in the `config` module calls this, which keeps the
    /// "exactly one root per process" invariant structural. The root always
    /// carries a logger and a timeout so attribute resolution terminates
    /// with a value for both.
    pub(crate) fn global_root() -> Self {
        let attrs = Attributes {
            logger: Some(Logger::stdout()),
            timeout: Some(DEFAULT_TIMEOUT),
            ..Attributes::default()
        };

        Self {
            attrs: ArcSwap::from_pointee(attrs),
            global: true,
            parent: None,
            frozen: AtomicBool::new(false),
            connection: OnceLock::new(),
        }
    }

    /// Whether this instance is the root of a delegation chain.
    pub fn is_global(&self) -> bool {
        self.global
    }

    /// The configuration this instance delegates to: the explicit parent if
    /// one was supplied, otherwise the global root. A global instance has no
    /// parent.
    pub fn parent(&self) -> Option<Arc<Configuration>> {
        if self.global {
            return None;
        }
        Some(self.parent.clone().unwrap_or_else(global))
    }

    /// Base URL, resolved through the chain.
    pub fn url(&self) -> Option<String> {
        self.resolve(self.attrs.load().url.clone(), |parent| parent.url())
    }

    /// Basic auth username, resolved through the chain.
    pub fn basic_user(&self) -> Option<String> {
        self.resolve(self.attrs.load().basic_user.clone(), |parent| parent.basic_user())
    }

    /// Basic auth password, resolved through the chain.
    pub fn basic_password(&self) -> Option<String> {
        self.resolve(self.attrs.load().basic_password.clone(), |parent| {
            parent.basic_password()
        })
    }

    /// Logger, resolved through the chain. `None` disables logging.
    pub fn logger(&self) -> Option<Logger> {
        self.resolve(self.attrs.load().logger.clone(), |parent| parent.logger())
    }

    /// Request timeout, resolved through the chain.
    pub fn timeout(&self) -> Option<Duration> {
        self.resolve(self.attrs.load().timeout, |parent| parent.timeout())
    }

    /// Mock flag, resolved through the chain.
    pub fn mock(&self) -> Option<bool> {
        self.resolve(self.attrs.load().mock, |parent| parent.mock())
    }

    /// Boolean coercion of the resolved mock flag.
    pub fn is_mock(&self) -> bool {
        self.mock().unwrap_or(false)
    }

    pub fn set_url(&self, url: impl Into<String>) -> Result<()> {
        let url = url.into();
        self.update(|attrs| attrs.url = Some(url.clone()))
    }

    pub fn set_basic_user(&self, user: impl Into<String>) -> Result<()> {
        let user = user.into();
        self.update(|attrs| attrs.basic_user = Some(user.clone()))
    }

    pub fn set_basic_password(&self, password: impl Into<String>) -> Result<()> {
        let password = password.into();
        self.update(|attrs| attrs.basic_password = Some(password.clone()))
    }

    pub fn set_logger(&self, logger: Logger) -> Result<()> {
        self.update(|attrs| attrs.logger = Some(logger.clone()))
    }

    pub fn set_timeout(&self, timeout: Duration) -> Result<()> {
        self.update(|attrs| attrs.timeout = Some(timeout))
    }

    pub fn set_mock(&self, mock: bool) -> Result<()> {
        self.update(|attrs| attrs.mock = Some(mock))
    }

    /// The HTTP connection for this configuration.
    ///
    /// Returns the connection cached by [`freeze`](Self::freeze) when there
    /// is one; before that a fresh connection is derived from the resolved
    /// attributes on every call, so attribute changes keep taking effect.
    pub fn connection(&self) -> Connection {
        match self.connection.get() {
            Some(connection) => connection.clone(),
            None => self.build_connection(),
        }
    }

    /// Eagerly build and cache the connection, then make this instance
    /// immutable. Idempotent: the first call pins the connection and later
    /// calls keep it.
    pub fn freeze(&self) {
        self.connection.get_or_init(|| self.build_connection());
        self.frozen.store(true, Ordering::Release);
    }

    /// Whether [`freeze`](Self::freeze) has been called.
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    fn build_connection(&self) -> Connection {
        Connection::new(self.url(), self.basic_user(), self.basic_password())
    }

    /// Resolution rule shared by every attribute getter: own value wins when
    /// this instance is global or has the attribute set, otherwise the
    /// parent chain answers.
    fn resolve<T, F>(&self, own: Option<T>, from_parent: F) -> Option<T>
    where
        F: Fn(&Configuration) -> Option<T>,
    {
        if self.global || own.is_some() {
            return own;
        }
        self.parent().and_then(|parent| from_parent(&parent))
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: Fn(&mut Attributes),
    {
        if self.is_frozen() {
            return Err(Error::FrozenConfiguration);
        }
        self.attrs.rcu(|attrs| {
            let mut next = (**attrs).clone();
            apply(&mut next);
            next
        });
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::builder().build()
    }
}
