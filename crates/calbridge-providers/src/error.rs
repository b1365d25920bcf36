//! Error types for calendar adapter operations.
//!
//! Every failure the adapter reports, from a bad configuration attribute to a
//! 404 from the calendar service, is a [`ProviderError`] carrying one
//! [`ProviderErrorCode`].

use std::fmt;

use calbridge_protocol::{CommandError, ErrorCode, ErrorResponse};
use thiserror::Error;

/// The category of an adapter error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// A required configuration attribute is missing or malformed.
    ConfigurationError,
    /// The service-account key could not be read or used.
    CredentialError,
    /// The command payload does not name a known command.
    UnknownCommand,
    /// The command is known but its parameters are malformed.
    InvalidCommand,
    /// An operation arrived before the first successful reconfigure.
    NotConfigured,
    /// The calendar service (or its token endpoint) failed or rejected the call.
    RemoteServiceError,
    /// The operation did not finish before its deadline.
    Timeout,
    /// Unexpected local failure.
    InternalError,
}

impl ProviderErrorCode {
    /// Returns a machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigurationError => "configuration_error",
            Self::CredentialError => "credential_error",
            Self::UnknownCommand => "unknown_command",
            Self::InvalidCommand => "invalid_command",
            Self::NotConfigured => "not_configured",
            Self::RemoteServiceError => "remote_service_error",
            Self::Timeout => "timeout",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ProviderErrorCode> for ErrorCode {
    fn from(code: ProviderErrorCode) -> Self {
        match code {
            ProviderErrorCode::ConfigurationError => Self::ConfigurationError,
            ProviderErrorCode::CredentialError => Self::CredentialError,
            ProviderErrorCode::UnknownCommand => Self::UnknownCommand,
            ProviderErrorCode::InvalidCommand => Self::InvalidCommand,
            ProviderErrorCode::NotConfigured => Self::NotConfigured,
            ProviderErrorCode::RemoteServiceError => Self::RemoteServiceError,
            ProviderErrorCode::Timeout => Self::Timeout,
            ProviderErrorCode::InternalError => Self::InternalError,
        }
    }
}

/// An error raised by the calendar adapter.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    /// HTTP status of the remote response, when there was one.
    http_status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            http_status: None,
            source: None,
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Creates a credential error.
    pub fn credential(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::CredentialError, message)
    }

    /// Creates an unknown command error.
    pub fn unknown_command(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::UnknownCommand, message)
    }

    /// Creates an invalid command error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidCommand, message)
    }

    /// Creates the error returned before the adapter is configured.
    pub fn not_configured() -> Self {
        Self::new(
            ProviderErrorCode::NotConfigured,
            "the adapter has not been configured; call reconfigure first",
        )
    }

    /// Creates a remote error without an HTTP status (transport failure,
    /// unreadable or unexpected response).
    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::RemoteServiceError, message)
    }

    /// Creates a remote error from a non-success HTTP response.
    pub fn remote_status(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::remote(message);
        err.http_status = Some(status);
        err
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Timeout, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InternalError, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status of the remote failure, if any.
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(status) = self.http_status {
            write!(f, " (HTTP {status})")?;
        }
        Ok(())
    }
}

impl From<CommandError> for ProviderError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Unknown(_) => Self::unknown_command(err.to_string()),
            CommandError::Invalid { .. } => Self::invalid_command(err.to_string()),
        }
    }
}

impl From<&ProviderError> for ErrorResponse {
    fn from(err: &ProviderError) -> Self {
        let message = match err.http_status {
            Some(status) => format!("{} (HTTP {status})", err.message),
            None => err.message.clone(),
        };
        ErrorResponse::new(err.code.into(), message)
    }
}

/// A specialized Result type for adapter operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
