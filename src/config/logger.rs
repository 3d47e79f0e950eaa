//! Logger handles carried by the configuration chain.

use std::fmt;

use tracing::dispatcher::{self, Dispatch};
use tracing_subscriber::EnvFilter;

/// A cheap, clonable logging handle.
///
/// Wraps a [`tracing::Dispatch`] so that every configuration can point at its
/// own subscriber instead of the process-global one. Records emitted through
/// a `Logger` reach only the wrapped subscriber.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    /// Wrap an existing dispatcher.
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// The default root logger: human-readable output on stdout at debug
    /// level, overridable through `RUST_LOG`.
    pub fn stdout() -> Self {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();

        Self::new(Dispatch::new(subscriber))
    }

    /// Emit a debug record through the wrapped subscriber.
    pub fn debug(&self, message: &str) {
        dispatcher::with_default(&self.dispatch, || {
            tracing::debug!("{}", message);
        });
    }
}

impl From<Dispatch> for Logger {
    fn from(dispatch: Dispatch) -> Self {
        Self::new(dispatch)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}
