//! Request and response types exchanged with the host runtime.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::PROTOCOL_VERSION;
use crate::command::CommandResult;

/// Component attributes as handed over by the host.
pub type Attributes = Map<String, Value>;

/// Message envelope wrapping all protocol messages.
///
/// Every message exchanged between host and module is wrapped in this
/// envelope, which carries the protocol version and the request id used to
/// correlate a response with its request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Protocol version (always "1" for v1).
    pub protocol_version: String,
    /// Unique request ID for correlation.
    pub request_id: String,
    /// The actual payload.
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Creates a new envelope with the current protocol version.
    pub fn new(request_id: impl Into<String>, payload: T) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            request_id: request_id.into(),
            payload,
        }
    }

    /// Creates a request envelope.
    pub fn request(request_id: impl Into<String>, request: T) -> Self {
        Self::new(request_id, request)
    }

    /// Creates a response envelope.
    pub fn response(request_id: impl Into<String>, response: T) -> Self {
        Self::new(request_id, response)
    }

    /// Checks if this envelope uses a compatible protocol version.
    pub fn is_compatible(&self) -> bool {
        self.protocol_version == PROTOCOL_VERSION
    }
}

/// Lifecycle calls the host makes on the module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Check a configuration without applying it.
    ValidateConfig {
        /// Raw component attributes.
        attributes: Attributes,
    },

    /// Apply a new configuration.
    Reconfigure {
        /// Raw component attributes.
        attributes: Attributes,
        /// Names of the resources the host resolved for this component.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        dependencies: Vec<String>,
    },

    /// Run a calendar command.
    DoCommand {
        /// Single-key command payload, decoded by the adapter.
        command: Value,
        /// Upper bound for the whole command, in seconds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_secs: Option<f64>,
    },

    /// Ping to check module liveness.
    Ping,

    /// Ask the module process to exit.
    Shutdown,
}

impl Request {
    /// Creates a ValidateConfig request.
    pub fn validate_config(attributes: Attributes) -> Self {
        Self::ValidateConfig { attributes }
    }

    /// Creates a Reconfigure request without dependencies.
    pub fn reconfigure(attributes: Attributes) -> Self {
        Self::Reconfigure {
            attributes,
            dependencies: Vec::new(),
        }
    }

    /// Creates a DoCommand request.
    pub fn do_command(command: Value, timeout_secs: Option<f64>) -> Self {
        Self::DoCommand {
            command,
            timeout_secs,
        }
    }

    /// Returns the wire name of the request, used as a tracing field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidateConfig { .. } => "validate_config",
            Self::Reconfigure { .. } => "reconfigure",
            Self::DoCommand { .. } => "do_command",
            Self::Ping => "ping",
            Self::Shutdown => "shutdown",
        }
    }
}

/// Responses sent from the module back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Result of a configuration check.
    Validated {
        /// Implicit dependencies the component requires (always empty).
        required: Vec<String>,
        /// Implicit dependencies the component may use (always empty).
        optional: Vec<String>,
    },

    /// Generic success response.
    Ok,

    /// Result of a calendar command.
    CommandResult {
        /// Single-key result object.
        result: CommandResult,
    },

    /// Error response.
    Error {
        /// Error details.
        #[serde(flatten)]
        error: ErrorResponse,
    },

    /// Pong response to Ping.
    Pong,
}

impl Response {
    /// Creates a Validated response with no implicit dependencies.
    pub fn validated() -> Self {
        Self::Validated {
            required: Vec::new(),
            optional: Vec::new(),
        }
    }

    /// Creates a CommandResult response.
    pub fn command_result(result: CommandResult) -> Self {
        Self::CommandResult { result }
    }

    /// Creates an error response from an ErrorResponse.
    pub fn from_error(error: ErrorResponse) -> Self {
        Self::Error { error }
    }

    /// Returns true if this is anything but an error.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Error { .. })
    }

    /// Returns the error if this is an error response.
    pub fn as_error(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Error { error } => Some(error),
            _ => None,
        }
    }
}

/// Error codes reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Required attribute missing or malformed.
    ConfigurationError,

    /// Service-account key unreadable or unusable.
    CredentialError,

    /// Command payload does not name a known command.
    UnknownCommand,

    /// Known command with malformed parameters.
    InvalidCommand,

    /// A command arrived before the first successful reconfigure.
    NotConfigured,

    /// The calendar service failed or answered with an error.
    RemoteServiceError,

    /// The command did not finish within its deadline.
    Timeout,

    /// Anything else.
    InternalError,
}

impl ErrorCode {
    /// Returns a human-readable description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ConfigurationError => "Invalid configuration",
            Self::CredentialError => "Credentials could not be loaded",
            Self::UnknownCommand => "Unknown command",
            Self::InvalidCommand => "Invalid command parameters",
            Self::NotConfigured => "Adapter is not configured",
            Self::RemoteServiceError => "Calendar service returned an error",
            Self::Timeout => "The request timed out",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Error response details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl std::error::Error for ErrorResponse {}
