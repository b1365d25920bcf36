//! Unix socket client for talking to a running module.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::net::UnixStream;
use tracing::{debug, warn};
use uuid::Uuid;

use calbridge_protocol::{Envelope, Request, Response, read_message, write_message};

use crate::error::{ClientError, ClientResult};

/// Client for a calbridge module socket.
pub struct SocketClient {
    socket_path: PathBuf,
    timeout: Duration,
}

impl SocketClient {
    /// Creates a new socket client.
    pub fn new(socket_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            socket_path: socket_path.into(),
            timeout,
        }
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Sends a request and waits for the response.
    ///
    /// Error responses are returned as `Ok`; see [`call`](Self::call).
    pub async fn send(&self, request: Request) -> ClientResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let envelope = Envelope::request(&request_id, request);

        debug!(
            socket = %self.socket_path.display(),
            request_id = %request_id,
            "connecting to module"
        );

        let mut stream =
            tokio::time::timeout(self.timeout, UnixStream::connect(&self.socket_path))
                .await
                .map_err(|_| {
                    ClientError::Connection(format!(
                        "connection timed out after {:?}",
                        self.timeout
                    ))
                })?
                .map_err(|e| {
                    ClientError::Connection(format!(
                        "failed to connect to {}: {}",
                        self.socket_path.display(),
                        e
                    ))
                })?;

        tokio::time::timeout(self.timeout, write_message(&mut stream, &envelope))
            .await
            .map_err(|_| ClientError::Timeout("sending request".into()))??;

        debug!("request sent, waiting for response");

        let response: Envelope<Response> =
            tokio::time::timeout(self.timeout, read_message(&mut stream))
                .await
                .map_err(|_| ClientError::Timeout("reading response".into()))??
                .ok_or_else(|| {
                    ClientError::Connection("module closed the connection".into())
                })?;

        if response.request_id != request_id {
            warn!(
                expected = %request_id,
                received = %response.request_id,
                "response request_id mismatch"
            );
        }

        Ok(response.payload)
    }

    /// Sends a request, turning an error response into [`ClientError::Remote`].
    pub async fn call(&self, request: Request) -> ClientResult<Response> {
        match self.send(request).await? {
            Response::Error { error } => Err(ClientError::Remote(error)),
            response => Ok(response),
        }
    }

    /// Pings the module to check if it's alive.
    pub async fn ping(&self) -> ClientResult<bool> {
        match self.send(Request::Ping).await {
            Ok(Response::Pong) => Ok(true),
            Ok(_) => Ok(false),
            Err(_) => Ok(false),
        }
    }
}
