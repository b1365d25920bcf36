//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// calbridge - Google Calendar adapter module
#[derive(Debug, Parser)]
#[command(name = "calbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the module process on a Unix socket
    Serve {
        /// Socket to listen on, chosen by the host
        #[arg(env = "CALBRIDGE_SOCKET")]
        socket: PathBuf,

        /// Seconds allowed to finish reading a request or writing a response
        #[arg(long, default_value = "30")]
        connection_timeout: u64,

        /// Maximum concurrent host connections
        #[arg(long, default_value = "100")]
        max_connections: usize,
    },

    /// Check an attributes file without contacting anything
    Validate {
        /// Attributes file (JSON, or TOML with a .toml extension)
        #[arg(long, short)]
        config: PathBuf,
    },

    /// Validate and apply an attributes file on a running module
    Configure {
        /// Module socket
        #[arg(long, env = "CALBRIDGE_SOCKET")]
        socket: PathBuf,

        /// Attributes file (JSON, or TOML with a .toml extension)
        #[arg(long, short)]
        config: PathBuf,
    },

    /// Send a command to a running module and print the result
    Call {
        /// Module socket
        #[arg(long, env = "CALBRIDGE_SOCKET")]
        socket: PathBuf,

        /// Seconds the module may spend on the command
        #[arg(long)]
        timeout: Option<f64>,

        /// Command payload, e.g. '{"get_events": {"max_results": 5}}'
        command: String,
    },

    /// Check that a module is answering
    Ping {
        /// Module socket
        #[arg(long, env = "CALBRIDGE_SOCKET")]
        socket: PathBuf,
    },
}

impl Command {
    /// Returns true for the long-running module process.
    pub fn is_serve(&self) -> bool {
        matches!(self, Self::Serve { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve_with_socket() {
        let cli = Cli::try_parse_from(["calbridge", "serve", "/run/host/calbridge.sock"]).unwrap();
        match cli.command {
            Command::Serve {
                socket,
                connection_timeout,
                max_connections,
            } => {
                assert_eq!(socket, PathBuf::from("/run/host/calbridge.sock"));
                assert_eq!(connection_timeout, 30);
                assert_eq!(max_connections, 100);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.debug);
    }

    #[test]
    fn parse_call_with_timeout_and_global_debug() {
        let cli = Cli::try_parse_from([
            "calbridge",
            "call",
            "--socket",
            "/tmp/c.sock",
            "--timeout",
            "2.5",
            r#"{"get_events": {}}"#,
            "--debug",
        ])
        .unwrap();

        assert!(cli.debug);
        match cli.command {
            Command::Call {
                socket,
                timeout,
                command,
            } => {
                assert_eq!(socket, PathBuf::from("/tmp/c.sock"));
                assert_eq!(timeout, Some(2.5));
                assert_eq!(command, r#"{"get_events": {}}"#);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn validate_requires_config() {
        assert!(Cli::try_parse_from(["calbridge", "validate"]).is_err());
    }

    #[test]
    fn serve_is_serve() {
        let cli = Cli::try_parse_from(["calbridge", "serve", "/tmp/s.sock"]).unwrap();
        assert!(cli.command.is_serve());
        let cli = Cli::try_parse_from(["calbridge", "ping", "--socket", "/tmp/s.sock"]).unwrap();
        assert!(!cli.command.is_serve());
    }

    #[test]
    fn socket_is_required() {
        if std::env::var_os("CALBRIDGE_SOCKET").is_some() {
            return;
        }
        for args in [
            vec!["calbridge", "serve"],
            vec!["calbridge", "ping"],
            vec!["calbridge", "call", r#"{"get_events": {}}"#],
            vec!["calbridge", "configure", "--config", "attributes.json"],
        ] {
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        }
    }
}
