//! Command payloads and host IPC for calbridge.
//!
//! Two layers live here:
//!
//! - [`Command`] / [`CommandResult`]: the closed set of calendar commands the
//!   adapter understands, decoded once from the host's generic key-value
//!   payload.
//! - [`Envelope`], [`Request`], [`Response`] and the framing helpers: the
//!   wire protocol between the host runtime and the module process over a
//!   Unix socket.
//!
//! # Framing
//!
//! Messages are sent as length-prefixed JSON:
//! - 4 bytes: message length (u32, big-endian)
//! - N bytes: JSON payload
//!
//! # Example
//!
//! ```rust
//! use calbridge_protocol::{Envelope, Request, encode_message, decode_message};
//!
//! let request = Envelope::request("req-123", Request::Ping);
//! let bytes = encode_message(&request).unwrap();
//! let decoded: Envelope<Request> = decode_message(&bytes).unwrap();
//! assert_eq!(decoded.request_id, "req-123");
//! ```

mod command;
mod error;
mod framing;
mod types;

pub use command::{
    AddEvent, Command, CommandError, CommandResult, DEFAULT_MAX_RESULTS, DELETE_STATUS,
    DeleteEvent, GetEvents,
};
pub use error::{ProtocolError, ProtocolResult};
pub use framing::{decode_message, encode_message, read_message, write_message};
pub use types::{Attributes, Envelope, ErrorCode, ErrorResponse, Request, Response};

/// Protocol version constant.
pub const PROTOCOL_VERSION: &str = "1";

/// Maximum message size (1 MB).
pub const MAX_MESSAGE_SIZE: u32 = 1024 * 1024;
