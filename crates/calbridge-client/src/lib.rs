//! CLI and socket client for the calbridge module.
//!
//! This crate provides the `calbridge` binary: `serve` runs the module
//! process the host launches, the other subcommands let an operator check a
//! configuration or poke a running module by hand.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod socket;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use socket::SocketClient;
