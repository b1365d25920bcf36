//! Subcommand implementations.

pub mod call;
pub mod configure;
pub mod ping;
pub mod serve;
pub mod validate;

use std::time::Duration;

/// Socket timeout for requests that do not run a calendar command.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
