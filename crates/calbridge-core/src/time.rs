//! Event time as exchanged with the calendar service.
//!
//! Google Calendar describes the start and end of an event with an object
//! carrying either an exact `dateTime` (RFC 3339) or, for all-day events, a
//! bare `date` (`YYYY-MM-DD`). [`EventTime`] keeps that wire shape and knows
//! how to pick the value a caller should see.

use serde::{Deserialize, Serialize};

/// Start or end of a calendar event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    /// Exact timestamp, present for timed events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// Date only, present for all-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// IANA timezone the service attached to the time, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    /// Returns the value to display: the timestamp if present, else the date.
    pub fn value(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }
}
