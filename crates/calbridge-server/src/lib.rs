//! Module process: serves the calendar adapter to the host over a Unix socket.
//!
//! The host runtime launches the module with a socket path, connects, and
//! sends [`Request`](calbridge_protocol::Request)s. Each connection runs in
//! its own task and its requests are answered in order.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use calbridge_providers::CalendarAdapter;
//! use calbridge_server::{
//!     RequestHandler, ServerConfig, SignalHandler, SocketServer, make_connection_handler,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let signals = SignalHandler::new();
//!     signals.spawn_listener()?;
//!
//!     let server = SocketServer::new(ServerConfig::new("/tmp/calbridge.sock")).await?;
//!     let handler = RequestHandler::new(Arc::new(CalendarAdapter::new()), signals.shutdown_handle());
//!     server
//!         .run_until_shutdown(make_connection_handler(handler), signals.shutdown().wait())
//!         .await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod handler;
mod signals;
mod socket;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{RequestHandler, make_connection_handler};
pub use signals::{ShutdownHandle, ShutdownSignal, SignalHandler};
pub use socket::{Connection, SocketServer};
