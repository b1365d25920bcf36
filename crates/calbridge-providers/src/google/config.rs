//! Adapter configuration.

use std::path::PathBuf;
use std::time::Duration;

use calbridge_protocol::Attributes;
use serde_json::Value;

use crate::error::{ProviderError, ProviderResult};

/// Attribute naming the calendar to operate on.
pub const CALENDAR_ID: &str = "calendar_id";

/// Attribute naming the service-account key file.
pub const SERVICE_ACCOUNT_FILE: &str = "service_account_file";

/// Configuration of one adapter instance, validated from host attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Calendar identifier (e.g. `primary` or `team@example.com`).
    pub calendar_id: String,
    /// Path to the service-account key JSON.
    pub service_account_file: PathBuf,
}

impl AdapterConfig {
    /// Validates raw host attributes into a configuration.
    ///
    /// Only the shape of the attributes is checked: the key file is not
    /// opened here.
    pub fn from_attributes(attributes: &Attributes) -> ProviderResult<Self> {
        let calendar_id = required_string(attributes, CALENDAR_ID)?;
        let service_account_file = required_string(attributes, SERVICE_ACCOUNT_FILE)?;

        Ok(Self {
            calendar_id,
            service_account_file: PathBuf::from(service_account_file),
        })
    }
}

fn required_string(attributes: &Attributes, name: &str) -> ProviderResult<String> {
    match attributes.get(name) {
        Some(Value::String(value)) if !value.is_empty() => Ok(value.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(ProviderError::configuration(
            format!("A '{name}' must be defined in the configuration."),
        )),
        Some(other) => Err(ProviderError::configuration(format!(
            "'{name}' must be a string, got {other}"
        ))),
    }
}

/// Remote endpoints and HTTP settings used by the Google client.
///
/// Production code uses [`GoogleEndpoints::default`]; tests point the
/// adapter at a mock server with [`GoogleEndpoints::with_api_base`]. The
/// token endpoint always comes from the key file.
#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    /// Base URL of the Calendar API v3.
    pub api_base: String,
    /// Per-request timeout, applied to API calls and token requests.
    pub timeout: Duration,
    /// User agent string for API requests.
    pub user_agent: String,
}

impl GoogleEndpoints {
    /// Default base URL for Google Calendar API v3.
    pub const DEFAULT_API_BASE: &'static str = "https://www.googleapis.com/calendar/v3";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Sets the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            api_base: Self::DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("calbridge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
