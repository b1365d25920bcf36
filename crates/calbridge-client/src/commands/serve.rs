//! Serve command: the module process the host launches.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use calbridge_providers::CalendarAdapter;
use calbridge_server::{
    RequestHandler, ServerConfig, SignalHandler, SocketServer, make_connection_handler,
};

use crate::error::ClientResult;

/// Listens on `socket_path` until SIGTERM, SIGINT or a host `shutdown` request.
///
/// The adapter starts unconfigured; the host sends `reconfigure` first.
pub async fn run(
    socket_path: PathBuf,
    connection_timeout: Duration,
    max_connections: usize,
) -> ClientResult<()> {
    let signal_handler = SignalHandler::new();
    signal_handler.spawn_listener()?;

    let config = ServerConfig::new(&socket_path)
        .with_connection_timeout(connection_timeout)
        .with_max_connections(max_connections);
    let server = SocketServer::new(config).await?;

    let adapter = Arc::new(CalendarAdapter::new());
    let handler = RequestHandler::new(adapter, signal_handler.shutdown_handle());

    info!(
        socket = %socket_path.display(),
        version = env!("CARGO_PKG_VERSION"),
        "Module started"
    );

    server
        .run_until_shutdown(
            make_connection_handler(handler),
            signal_handler.shutdown().wait(),
        )
        .await?;

    info!("Module stopped");
    Ok(())
}
