//! Calendar commands and their results.
//!
//! The host hands the adapter a generic key-value payload in which one
//! top-level key selects the operation:
//!
//! ```json
//! {"get_events": {"max_results": 5}}
//! {"add_event": {"summary": "Standup", "start": {...}, "end": {...}}}
//! {"delete_event": {"event_id": "abc123"}}
//! ```
//!
//! [`Command::from_value`] turns that payload into a closed enum once, so the
//! rest of the adapter never looks at raw keys again.

use calbridge_core::EventView;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Number of events listed when `max_results` is not given.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Top-level keys that select a command.
pub const COMMAND_NAMES: [&str; 3] = ["get_events", "add_event", "delete_event"];

/// Status returned after a successful delete.
pub const DELETE_STATUS: &str = "Event deleted successfully.";

/// Errors raised while decoding a command payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The payload does not select exactly one known command.
    #[error("unknown command: {0}")]
    Unknown(String),

    /// The command is known but its parameters are malformed.
    #[error("invalid parameters for {command}: {message}")]
    Invalid {
        /// Command name (`get_events`, `add_event`, `delete_event`).
        command: &'static str,
        /// What was wrong with the parameters.
        message: String,
    },
}

/// Parameters of `get_events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEvents {
    /// Upper bound on the number of events returned.
    #[serde(
        default = "default_max_results",
        deserialize_with = "deserialize_max_results"
    )]
    pub max_results: u32,
}

impl Default for GetEvents {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Parameters of `add_event`: the event resource, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddEvent {
    /// Event body as understood by the calendar service.
    pub event: Map<String, Value>,
}

/// Parameters of `delete_event`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEvent {
    /// Identifier of the event to delete.
    pub event_id: String,
}

/// A decoded calendar command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "Value")]
pub enum Command {
    /// List upcoming events.
    GetEvents(GetEvents),
    /// Create an event.
    AddEvent(AddEvent),
    /// Delete an event.
    DeleteEvent(DeleteEvent),
}

impl Command {
    /// Creates a `get_events` command.
    pub fn get_events(max_results: u32) -> Self {
        Self::GetEvents(GetEvents { max_results })
    }

    /// Creates an `add_event` command.
    pub fn add_event(event: Map<String, Value>) -> Self {
        Self::AddEvent(AddEvent { event })
    }

    /// Creates a `delete_event` command.
    pub fn delete_event(event_id: impl Into<String>) -> Self {
        Self::DeleteEvent(DeleteEvent {
            event_id: event_id.into(),
        })
    }

    /// Returns the wire name of this command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetEvents(_) => "get_events",
            Self::AddEvent(_) => "add_event",
            Self::DeleteEvent(_) => "delete_event",
        }
    }

    /// Decodes a host payload into a command.
    ///
    /// The payload must be an object carrying exactly one known command key.
    /// Other keys are ignored. Matching is exact: no case folding, no
    /// prefixes.
    pub fn from_value(value: Value) -> Result<Self, CommandError> {
        let Value::Object(mut map) = value else {
            return Err(CommandError::Unknown(format!(
                "expected an object, got {}",
                value_kind(&value)
            )));
        };

        let present: Vec<&str> = COMMAND_NAMES
            .into_iter()
            .filter(|name| map.contains_key(*name))
            .collect();

        let key = match present.as_slice() {
            [key] => *key,
            [] if map.is_empty() => return Err(CommandError::Unknown("empty command".to_string())),
            [] => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                return Err(CommandError::Unknown(keys.join(", ")));
            }
            _ => {
                return Err(CommandError::Unknown(format!(
                    "expected a single command key, got [{}]",
                    present.join(", ")
                )));
            }
        };
        let params = map.remove(key).unwrap_or(Value::Null);

        match key {
            "get_events" => decode_params("get_events", params).map(Self::GetEvents),
            "add_event" => match params {
                Value::Object(event) => Ok(Self::add_event(event)),
                other => Err(CommandError::Invalid {
                    command: "add_event",
                    message: format!("expected an event object, got {}", value_kind(&other)),
                }),
            },
            _ => decode_params("delete_event", params).map(Self::DeleteEvent),
        }
    }
}

impl TryFrom<Value> for Command {
    type Error = CommandError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Result of a command, serialized as a single-key object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandResult {
    /// Upcoming events, ordered by start time.
    Events(Vec<EventView>),
    /// Identifier assigned to a newly created event.
    EventId(String),
    /// Fixed status after a delete.
    Status(String),
}

impl CommandResult {
    /// Returns the status produced by a successful delete.
    pub fn deleted() -> Self {
        Self::Status(DELETE_STATUS.to_string())
    }
}

fn decode_params<T: for<'de> Deserialize<'de>>(
    command: &'static str,
    params: Value,
) -> Result<T, CommandError> {
    serde_json::from_value(params).map_err(|e| CommandError::Invalid {
        command,
        message: e.to_string(),
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

/// Accepts positive integers, including integral floats such as `2.0`:
/// hosts that carry numbers as doubles send them that way.
fn deserialize_max_results<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < 1.0 || value > f64::from(u32::MAX) {
        return Err(D::Error::custom(format!(
            "max_results must be a positive integer, got {value}"
        )));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_get_events_default() {
        let command = Command::from_value(json!({"get_events": {}})).unwrap();
        assert_eq!(command, Command::get_events(DEFAULT_MAX_RESULTS));
        assert_eq!(command.name(), "get_events");
    }

    #[test]
    fn decode_get_events_max_results() {
        let command = Command::from_value(json!({"get_events": {"max_results": 2}})).unwrap();
        assert_eq!(command, Command::get_events(2));
    }

    #[test]
    fn decode_get_events_float_max_results() {
        let command = Command::from_value(json!({"get_events": {"max_results": 5.0}})).unwrap();
        assert_eq!(command, Command::get_events(5));
    }

    #[test]
    fn decode_get_events_rejects_bad_max_results() {
        for bad in [json!(0), json!(-3), json!(2.5), json!("ten")] {
            let err =
                Command::from_value(json!({"get_events": {"max_results": bad}})).unwrap_err();
            assert!(
                matches!(err, CommandError::Invalid { command: "get_events", .. }),
                "unexpected error: {err:?}"
            );
        }
    }

    #[test]
    fn decode_add_event_passes_body_through() {
        let body = json!({
            "summary": "Standup",
            "start": {"dateTime": "2024-03-15T10:00:00Z"},
            "end": {"dateTime": "2024-03-15T10:15:00Z"},
            "x-unknown": [1, 2, 3]
        });
        let command = Command::from_value(json!({"add_event": body.clone()})).unwrap();

        match command {
            Command::AddEvent(AddEvent { event }) => assert_eq!(Value::Object(event), body),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn decode_add_event_requires_object() {
        let err = Command::from_value(json!({"add_event": "Standup"})).unwrap_err();
        assert_eq!(
            err,
            CommandError::Invalid {
                command: "add_event",
                message: "expected an event object, got a string".to_string()
            }
        );
    }

    #[test]
    fn decode_delete_event() {
        let command = Command::from_value(json!({"delete_event": {"event_id": "abc123"}})).unwrap();
        assert_eq!(command, Command::delete_event("abc123"));
    }

    #[test]
    fn decode_delete_event_requires_id() {
        let err = Command::from_value(json!({"delete_event": {}})).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Invalid {
                command: "delete_event",
                ..
            }
        ));
    }

    #[test]
    fn decode_unknown_key() {
        let err = Command::from_value(json!({"unsupported_key": {}})).unwrap_err();
        assert_eq!(err, CommandError::Unknown("unsupported_key".to_string()));
        assert_eq!(err.to_string(), "unknown command: unsupported_key");
    }

    #[test]
    fn decode_is_case_sensitive() {
        let err = Command::from_value(json!({"GET_EVENTS": {}})).unwrap_err();
        assert!(matches!(err, CommandError::Unknown(_)));
    }

    #[test]
    fn decode_rejects_multiple_commands() {
        let err = Command::from_value(json!({
            "get_events": {},
            "delete_event": {"event_id": "x"},
            "client_tag": "x"
        }))
        .unwrap_err();
        assert_eq!(
            err,
            CommandError::Unknown(
                "expected a single command key, got [get_events, delete_event]".to_string()
            )
        );
    }

    #[test]
    fn decode_ignores_unrelated_keys() {
        let command =
            Command::from_value(json!({"get_events": {"max_results": 2}, "client_tag": "x"}))
                .unwrap();
        assert_eq!(command, Command::GetEvents(GetEvents { max_results: 2 }));

        let command = Command::from_value(json!({
            "trace": {"id": 7},
            "delete_event": {"event_id": "abc"}
        }))
        .unwrap();
        assert_eq!(command, Command::delete_event("abc"));
    }

    #[test]
    fn decode_rejects_non_objects() {
        assert_eq!(
            Command::from_value(json!({})).unwrap_err(),
            CommandError::Unknown("empty command".to_string())
        );
        assert_eq!(
            Command::from_value(json!(["get_events"])).unwrap_err(),
            CommandError::Unknown("expected an object, got an array".to_string())
        );
    }

    #[test]
    fn deserialize_goes_through_from_value() {
        let command: Command =
            serde_json::from_str(r#"{"delete_event": {"event_id": "abc123"}}"#).unwrap();
        assert_eq!(command, Command::delete_event("abc123"));

        let err = serde_json::from_str::<Command>(r#"{"nope": {}}"#).unwrap_err();
        assert!(err.to_string().contains("unknown command: nope"));
    }

    #[test]
    fn serialize_command_shape() {
        let json = serde_json::to_value(Command::get_events(3)).unwrap();
        assert_eq!(json, json!({"get_events": {"max_results": 3}}));

        let json = serde_json::to_value(Command::delete_event("abc123")).unwrap();
        assert_eq!(json, json!({"delete_event": {"event_id": "abc123"}}));
    }

    #[test]
    fn result_shapes() {
        insta::assert_json_snapshot!(CommandResult::deleted(), @r#"
        {
          "status": "Event deleted successfully."
        }
        "#);

        insta::assert_json_snapshot!(CommandResult::EventId("evt-1".to_string()), @r#"
        {
          "event_id": "evt-1"
        }
        "#);

        let events = CommandResult::Events(vec![EventView {
            summary: "Standup".to_string(),
            start: "2024-03-15".to_string(),
            end: "2024-03-16".to_string(),
        }]);
        assert_eq!(
            serde_json::to_value(&events).unwrap(),
            json!({"events": [{"summary": "Standup", "start": "2024-03-15", "end": "2024-03-16"}]})
        );
    }
}
