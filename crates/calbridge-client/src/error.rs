//! Client error types.

use calbridge_protocol::{ErrorResponse, ProtocolError};
use calbridge_providers::ProviderError;
use calbridge_server::ServerError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Command payload given on the command line is not valid.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// Connection to the module failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// Protocol/framing error.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Request timed out.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The module answered with an error.
    #[error("{0}")]
    Remote(ErrorResponse),

    /// The module answered with a response that does not fit the request.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Local adapter check failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Module process failed.
    #[error(transparent)]
    Server(#[from] ServerError),
}
