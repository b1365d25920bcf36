//! Google Calendar API client.
//!
//! This module provides a low-level HTTP client for the three Calendar API
//! v3 calls the adapter makes, handling authentication, request building,
//! and response parsing.

use calbridge_core::{EventTime, EventView};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;
use yup_oauth2::ServiceAccountKey;

use crate::error::{ProviderError, ProviderResult};

use super::config::GoogleEndpoints;
use super::oauth::ServiceAccountAuth;

/// Google Calendar API client bound to one service account.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    api_base: String,
    auth: ServiceAccountAuth,
}

impl GoogleCalendarClient {
    /// Creates a client authenticating with the given key.
    pub async fn new(key: ServiceAccountKey, endpoints: &GoogleEndpoints) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(endpoints.timeout)
            .user_agent(endpoints.user_agent.as_str())
            .build()
            .map_err(|e| {
                ProviderError::internal(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        let auth = ServiceAccountAuth::new(key, endpoints.timeout).await?;

        Ok(Self {
            http_client,
            api_base: endpoints.api_base.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Returns the service-account identity the client acts as.
    pub fn client_email(&self) -> &str {
        self.auth.client_email()
    }

    /// Lists upcoming events from a calendar.
    ///
    /// Recurring events are expanded into single instances and the result is
    /// ordered by start time. Only the first page is read, so at most
    /// `max_results` events are returned.
    pub async fn list_events(
        &self,
        calendar_id: &str,
        max_results: u32,
    ) -> ProviderResult<Vec<EventView>> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let request = self.http_client.get(self.events_url(calendar_id)).query(&[
            ("timeMin", now),
            ("maxResults", max_results.to_string()),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ]);

        let body = self.send(request).await?;
        let list: EventListResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::remote(format!("failed to parse event list: {}", e)).with_source(e)
        })?;

        let events = list
            .items
            .into_iter()
            .map(|event| {
                EventView::project(event.id.as_deref(), event.summary, &event.start, &event.end)
                    .map_err(|e| {
                        ProviderError::remote(format!("invalid event in response: {}", e))
                            .with_source(e)
                    })
            })
            .collect::<ProviderResult<Vec<_>>>()?;

        debug!(calendar_id, count = events.len(), "listed events");
        Ok(events)
    }

    /// Creates an event and returns its identifier.
    ///
    /// The body is sent as-is; the service validates it.
    pub async fn insert_event(
        &self,
        calendar_id: &str,
        event: &Map<String, Value>,
    ) -> ProviderResult<String> {
        let request = self.http_client.post(self.events_url(calendar_id)).json(event);

        let body = self.send(request).await?;
        let created: InsertedEvent = serde_json::from_str(&body).map_err(|e| {
            ProviderError::remote(format!("failed to parse created event: {}", e)).with_source(e)
        })?;

        created
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProviderError::remote("created event has no id"))
    }

    /// Deletes an event.
    pub async fn delete_event(&self, calendar_id: &str, event_id: &str) -> ProviderResult<()> {
        let url = format!(
            "{}/{}",
            self.events_url(calendar_id),
            urlencoding::encode(event_id)
        );
        self.send(self.http_client.delete(url)).await?;
        Ok(())
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.api_base,
            urlencoding::encode(calendar_id)
        )
    }

    /// Authenticates and sends a request, returning the body of a success
    /// response.
    async fn send(&self, request: reqwest::RequestBuilder) -> ProviderResult<String> {
        let token = self.auth.access_token().await?;

        let response = request.bearer_auth(token).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                format!("connection failed: {}", e)
            } else {
                format!("request failed: {}", e)
            };
            ProviderError::remote(message).with_source(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ProviderError::remote(format!("failed to read response: {}", e)).with_source(e)
        })?;

        if !status.is_success() {
            return Err(ProviderError::remote_status(
                status.as_u16(),
                format!("API error ({}): {}", status, body),
            ));
        }

        Ok(body)
    }
}

/// Response from the events.list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListResponse {
    #[serde(default)]
    items: Vec<ApiEvent>,
}

/// A single event from the Google Calendar API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    id: Option<String>,
    summary: Option<String>,
    #[serde(default)]
    start: EventTime,
    #[serde(default)]
    end: EventTime,
}

/// Response from the events.insert endpoint.
#[derive(Debug, Deserialize)]
struct InsertedEvent {
    id: Option<String>,
}
