//! Config for the agent behaviors
//!
//! This module provides configuration options for the [`Server`](crate::server::Server).
//! Configuration is created programmatically using [`Configuration::new()`] and the chainable
//! `with_*` methods. The binary only sets the port; everything else keeps its default.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// Team name sent with every move reply by default.
pub const DEFAULT_TEAM_NAME: &str = "TEAM ANGLERS";

/// Configuration for agent behaviors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) team_name: String,
    pub(crate) address: IpAddr,
    pub(crate) move_timeout: Duration,
    pub(crate) log: bool,
    pub(crate) verbose: bool,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - Moves are signed with [`DEFAULT_TEAM_NAME`].
    /// - The server listens on every IPv4 interface.
    /// - A move must be computed within 5 seconds.
    /// - Logs go to stderr, not to a file.
    /// - Only `INFO` and above are logged.
    pub fn new() -> Self {
        Self {
            team_name: DEFAULT_TEAM_NAME.to_owned(),
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            move_timeout: Duration::from_secs(5),
            log: false,
            verbose: false,
        }
    }

    /// Name sent in the `team` field of move replies.
    pub fn with_team_name(mut self, name: impl Into<String>) -> Self {
        self.team_name = name.into();
        self
    }

    /// Address the listening socket binds to.
    pub fn with_address(mut self, address: IpAddr) -> Self {
        self.address = address;
        self
    }

    /// Maximum time spent computing a move before replying `Move timeout`.
    pub fn with_move_timeout(mut self, timeout: Duration) -> Self {
        self.move_timeout = timeout;
        self
    }

    /// Enable or disable logging to a timestamped file in the working directory.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Enable or disable `TRACE` level logs.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// See [`Configuration::with_team_name`]
    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    /// See [`Configuration::with_move_timeout`]
    pub fn move_timeout(&self) -> Duration {
        self.move_timeout
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
