//! Settings for the module's socket listener.
//!
//! The host decides where the module listens and passes the path on the
//! command line; there is no fallback location.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ServerError, ServerResult};

/// How the module listens for its host.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Unix socket the host connects to.
    pub socket_path: PathBuf,

    /// Limit for reading the rest of a started request and for writing a
    /// response. Waiting for the next request is not bounded.
    pub connection_timeout: Duration,

    /// Host connections served at the same time.
    pub max_connections: usize,
}

impl ServerConfig {
    /// Default for [`connection_timeout`](Self::connection_timeout).
    pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default for [`max_connections`](Self::max_connections).
    pub const DEFAULT_MAX_CONNECTIONS: usize = 100;

    /// Listens on `socket_path` with the default limits.
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            connection_timeout: Self::DEFAULT_CONNECTION_TIMEOUT,
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn with_max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    /// Rejects limits that would leave the module unable to answer.
    pub fn validate(&self) -> ServerResult<()> {
        if self.socket_path.as_os_str().is_empty() {
            return Err(ServerError::invalid_config("socket path is empty"));
        }
        if self.max_connections == 0 {
            return Err(ServerError::invalid_config(
                "max_connections must be at least 1",
            ));
        }
        if self.connection_timeout.is_zero() {
            return Err(ServerError::invalid_config(
                "connection_timeout must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_limits() {
        let config = ServerConfig::new("/run/host/calbridge.sock");
        assert_eq!(config.socket_path, PathBuf::from("/run/host/calbridge.sock"));
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
        assert_eq!(config.max_connections, 100);
        config.validate().unwrap();
    }

    #[test]
    fn builders_override_limits() {
        let config = ServerConfig::new("/run/host/calbridge.sock")
            .with_connection_timeout(Duration::from_secs(60))
            .with_max_connections(4);

        assert_eq!(config.connection_timeout, Duration::from_secs(60));
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn validate_rejects_unusable_limits() {
        let cases = [
            (ServerConfig::new(""), "socket path"),
            (
                ServerConfig::new("/tmp/c.sock").with_max_connections(0),
                "max_connections",
            ),
            (
                ServerConfig::new("/tmp/c.sock").with_connection_timeout(Duration::ZERO),
                "connection_timeout",
            ),
        ];
        for (config, field) in cases {
            let err = config.validate().unwrap_err();
            assert!(matches!(err, ServerError::InvalidConfig(_)));
            assert!(err.to_string().contains(field), "{err}");
        }
    }
}
