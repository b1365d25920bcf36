//! Shutdown of the module process.
//!
//! SIGTERM, SIGINT and a host `shutdown` request all flip the same watch
//! channel; the accept loop stops once it reads `true`.

use std::sync::Arc;

use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::{ServerError, ServerResult};

/// Owns the shutdown channel and the OS signal listener.
pub struct SignalHandler {
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl SignalHandler {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            shutdown_tx: Arc::new(shutdown_tx),
        }
    }

    /// Installs the SIGTERM and SIGINT handlers. Call once at startup.
    pub fn spawn_listener(&self) -> ServerResult<()> {
        let mut sigterm = signal(SignalKind::terminate()).map_err(ServerError::Signal)?;
        let mut sigint = signal(SignalKind::interrupt()).map_err(ServerError::Signal)?;
        let shutdown_tx = self.shutdown_tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => info!("Received SIGTERM, initiating shutdown"),
                _ = sigint.recv() => info!("Received SIGINT, initiating shutdown"),
            }
            shutdown_tx.send_replace(true);
            debug!("Signal listener stopped");
        });

        Ok(())
    }

    /// Returns a signal that completes once shutdown is triggered.
    pub fn shutdown(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.shutdown_tx.subscribe(),
        }
    }

    /// Creates a handle the request handler uses for host `shutdown`.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Completes once shutdown is signaled.
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub async fn wait(mut self) {
        // The sender lives in the handler, so the channel cannot close first.
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}

/// Triggers or checks shutdown from outside the signal listener.
#[derive(Clone, Debug)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.tx.borrow()
    }
}
