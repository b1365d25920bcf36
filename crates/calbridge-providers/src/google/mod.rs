//! Google Calendar adapter.
//!
//! The adapter authenticates as a service account and works on a single
//! calendar named in its configuration.
//!
//! # Authentication Flow
//!
//! 1. `reconfigure` reads the service-account key file and builds a
//!    `yup_oauth2` service-account authenticator
//! 2. The first API call exchanges a signed assertion for an access token
//!    at the key's `token_uri`
//! 3. The token is reused until shortly before it expires
//!
//! # Example
//!
//! ```ignore
//! use calbridge_providers::google::{CalendarAdapter, GoogleEndpoints};
//! use serde_json::json;
//!
//! let adapter = CalendarAdapter::from_config(&attributes, GoogleEndpoints::default()).await?;
//! let result = adapter
//!     .do_command(json!({"get_events": {"max_results": 5}}), None)
//!     .await?;
//! ```

mod adapter;
mod client;
mod config;
mod oauth;

pub use adapter::{CalendarAdapter, ImplicitDependencies};
pub use client::GoogleCalendarClient;
pub use config::{AdapterConfig, CALENDAR_ID, GoogleEndpoints, SERVICE_ACCOUNT_FILE};
pub use oauth::{CALENDAR_SCOPE, ServiceAccountAuth, load_service_account_key};
