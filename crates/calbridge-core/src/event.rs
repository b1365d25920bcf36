//! Event view returned to the host.
//!
//! The calendar service returns rich event resources; the host only ever sees
//! a flat `{summary, start, end}` projection of them, built by
//! [`EventView::project`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::EventTime;

/// Summary used for events that have no title.
pub const NO_TITLE: &str = "No Title";

/// Errors raised while projecting an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventViewError {
    /// The event has neither a timestamp nor a date for one of its bounds.
    #[error("event {event_id} has no {field} time")]
    MissingTime {
        /// Identifier of the offending event, or `"<unknown>"`.
        event_id: String,
        /// Either `"start"` or `"end"`.
        field: &'static str,
    },
}

/// Flat view of an upcoming event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    /// Event title, or [`NO_TITLE`].
    pub summary: String,
    /// Start timestamp, or the start date for all-day events.
    pub start: String,
    /// End timestamp, or the end date for all-day events.
    pub end: String,
}

impl EventView {
    /// Projects an event into its view.
    ///
    /// `event_id` is only used to build error messages.
    pub fn project(
        event_id: Option<&str>,
        summary: Option<String>,
        start: &EventTime,
        end: &EventTime,
    ) -> Result<Self, EventViewError> {
        let missing = |field| EventViewError::MissingTime {
            event_id: event_id.unwrap_or("<unknown>").to_string(),
            field,
        };

        let start = start.value().ok_or_else(|| missing("start"))?;
        let end = end.value().ok_or_else(|| missing("end"))?;

        Ok(Self {
            summary: summary.unwrap_or_else(|| NO_TITLE.to_string()),
            start: start.to_string(),
            end: end.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(value: &str) -> EventTime {
        EventTime {
            date_time: Some(value.to_string()),
            ..EventTime::default()
        }
    }

    fn all_day(value: &str) -> EventTime {
        EventTime {
            date: Some(value.to_string()),
            ..EventTime::default()
        }
    }

    #[test]
    fn project_timed_event() {
        let view = EventView::project(
            Some("evt1"),
            Some("Standup".to_string()),
            &timed("2024-03-15T10:00:00Z"),
            &timed("2024-03-15T10:15:00Z"),
        )
        .unwrap();

        assert_eq!(view.summary, "Standup");
        assert_eq!(view.start, "2024-03-15T10:00:00Z");
        assert_eq!(view.end, "2024-03-15T10:15:00Z");
    }

    #[test]
    fn project_defaults_summary() {
        let view = EventView::project(
            None,
            None,
            &all_day("2024-03-15"),
            &all_day("2024-03-16"),
        )
        .unwrap();

        assert_eq!(view.summary, NO_TITLE);
        assert_eq!(view.start, "2024-03-15");
        assert_eq!(view.end, "2024-03-16");
    }

    #[test]
    fn project_missing_start() {
        let err = EventView::project(
            Some("evt1"),
            None,
            &EventTime::default(),
            &all_day("2024-03-16"),
        )
        .unwrap_err();

        assert_eq!(
            err,
            EventViewError::MissingTime {
                event_id: "evt1".to_string(),
                field: "start"
            }
        );
        assert_eq!(err.to_string(), "event evt1 has no start time");
    }

    #[test]
    fn project_missing_end_without_id() {
        let err = EventView::project(
            None,
            None,
            &all_day("2024-03-15"),
            &EventTime::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "event <unknown> has no end time");
    }

    #[test]
    fn serializes_exactly_three_fields() {
        let view = EventView {
            summary: "Standup".to_string(),
            start: "2024-03-15T10:00:00Z".to_string(),
            end: "2024-03-15T10:15:00Z".to_string(),
        };

        insta::assert_json_snapshot!(view, @r#"
        {
          "summary": "Standup",
          "start": "2024-03-15T10:00:00Z",
          "end": "2024-03-15T10:15:00Z"
        }
        "#);
    }
}
