//! Server state vocabulary and wire models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Administrative states an operator can place a server into.
///
/// The remote endpoint is authoritative for what it accepts; the client does
/// not validate settings against this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminState {
    Ready,
    Maint,
    Drain,
}

/// Operational states reported by health checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationalState {
    Up,
    Down,
    Stopping,
}

impl AdminState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Maint => "maint",
            Self::Drain => "drain",
        }
    }
}

impl OperationalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stopping => "stopping",
        }
    }
}

impl fmt::Display for AdminState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OperationalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime view of one server inside a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeServer {
    pub name: String,
    pub address: String,
    pub port: u16,
    pub admin_state: AdminState,
    pub operational_state: OperationalState,
}
