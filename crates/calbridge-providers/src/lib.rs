//! Google Calendar adapter for calbridge.
//!
//! - [`CalendarAdapter`] - validates configuration, holds the current binding
//!   and dispatches host commands
//! - [`google`] - service-account authentication and the Calendar API client
//! - [`ProviderError`] - the error taxonomy reported back to the host
//!
//! # Architecture
//!
//! ```text
//!   host command (JSON)
//!          │
//!          ▼  Command::from_value
//! ┌──────────────────┐
//! │ CalendarAdapter  │── snapshot of Arc<Binding>
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────────┐     ┌────────────────────┐
//! │ GoogleCalendarClient │────▶│ ServiceAccountAuth │
//! └────────┬─────────────┘     └─────────┬──────────┘
//!          │                             │
//!          ▼                             ▼
//!   Calendar API v3               OAuth token endpoint
//! ```

pub mod error;
pub mod google;

#[cfg(test)]
mod test_support;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use google::{AdapterConfig, CalendarAdapter, GoogleEndpoints};
