//! The calendar adapter driven by the host runtime.
//!
//! [`CalendarAdapter`] implements the three lifecycle calls the host makes:
//! `validate_config`, `reconfigure` and `do_command`.

use std::sync::Arc;
use std::time::Duration;

use calbridge_protocol::{AddEvent, Attributes, Command, CommandResult, DeleteEvent, GetEvents};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};

use super::client::GoogleCalendarClient;
use super::config::{AdapterConfig, GoogleEndpoints};
use super::oauth::load_service_account_key;

/// Implicit dependencies reported by `validate_config`: (required, optional).
pub type ImplicitDependencies = (Vec<String>, Vec<String>);

/// Configuration and client built together by one reconfigure.
#[derive(Debug)]
struct Binding {
    config: AdapterConfig,
    client: GoogleCalendarClient,
}

/// Google Calendar adapter.
///
/// Starts unconfigured. Each successful [`reconfigure`](Self::reconfigure)
/// builds a fresh binding and swaps it in whole; commands already running
/// finish against the binding they started with.
#[derive(Debug)]
pub struct CalendarAdapter {
    endpoints: GoogleEndpoints,
    binding: RwLock<Option<Arc<Binding>>>,
}

impl CalendarAdapter {
    /// Creates an unconfigured adapter talking to Google.
    pub fn new() -> Self {
        Self::with_endpoints(GoogleEndpoints::default())
    }

    /// Creates an unconfigured adapter with custom endpoints.
    pub fn with_endpoints(endpoints: GoogleEndpoints) -> Self {
        Self {
            endpoints,
            binding: RwLock::new(None),
        }
    }

    /// Creates an adapter and applies its first configuration.
    pub async fn from_config(
        attributes: &Attributes,
        endpoints: GoogleEndpoints,
    ) -> ProviderResult<Self> {
        let adapter = Self::with_endpoints(endpoints);
        adapter.reconfigure(attributes).await?;
        Ok(adapter)
    }

    /// Checks that the attributes carry both required fields.
    ///
    /// Touches neither the file system nor the network. The adapter has no
    /// implicit dependencies, so both lists are always empty.
    pub fn validate_config(attributes: &Attributes) -> ProviderResult<ImplicitDependencies> {
        AdapterConfig::from_attributes(attributes)?;
        Ok((Vec::new(), Vec::new()))
    }

    /// Applies a configuration.
    ///
    /// Loads the service-account key, builds a new client and replaces the
    /// current binding. On failure the previous binding (if any) stays in
    /// place.
    #[tracing::instrument(skip_all)]
    pub async fn reconfigure(&self, attributes: &Attributes) -> ProviderResult<()> {
        let config = AdapterConfig::from_attributes(attributes)?;
        let key = load_service_account_key(&config.service_account_file).await?;
        let client = GoogleCalendarClient::new(key, &self.endpoints).await?;

        info!(
            calendar_id = %config.calendar_id,
            client_email = %client.client_email(),
            "adapter configured"
        );

        let binding = Arc::new(Binding { config, client });
        *self.binding.write().await = Some(binding);
        Ok(())
    }

    #[cfg(test)]
    async fn calendar_id(&self) -> Option<String> {
        self.binding
            .read()
            .await
            .as_ref()
            .map(|binding| binding.config.calendar_id.clone())
    }

    /// Decodes and runs a host command payload.
    ///
    /// `timeout` bounds the whole command, token exchange included.
    pub async fn do_command(
        &self,
        command: Value,
        timeout: Option<Duration>,
    ) -> ProviderResult<CommandResult> {
        let command = Command::from_value(command)?;
        match timeout {
            Some(limit) => {
                let name = command.name();
                tokio::time::timeout(limit, self.execute(command))
                    .await
                    .map_err(|_| {
                        ProviderError::timeout(format!(
                            "{} did not complete within {:?}",
                            name, limit
                        ))
                    })?
            }
            None => self.execute(command).await,
        }
    }

    /// Runs a decoded command.
    pub async fn execute(&self, command: Command) -> ProviderResult<CommandResult> {
        let binding = self.snapshot().await?;
        let calendar_id = binding.config.calendar_id.as_str();
        debug!(command = command.name(), calendar_id, "executing command");

        match command {
            Command::GetEvents(GetEvents { max_results }) => {
                let events = binding.client.list_events(calendar_id, max_results).await?;
                info!(count = events.len(), "Fetched {} events.", events.len());
                Ok(CommandResult::Events(events))
            }
            Command::AddEvent(AddEvent { event }) => {
                let event_id = binding.client.insert_event(calendar_id, &event).await?;
                info!(%event_id, "Event created: {}", event_id);
                Ok(CommandResult::EventId(event_id))
            }
            Command::DeleteEvent(DeleteEvent { event_id }) => {
                binding.client.delete_event(calendar_id, &event_id).await?;
                info!(%event_id, "Event {} deleted.", event_id);
                Ok(CommandResult::deleted())
            }
        }
    }

    /// Clones the current binding; the lock is released before any I/O.
    async fn snapshot(&self) -> ProviderResult<Arc<Binding>> {
        self.binding
            .read()
            .await
            .clone()
            .ok_or_else(ProviderError::not_configured)
    }
}

impl Default for CalendarAdapter {
    fn default() -> Self {
        Self::new()
    }
}
