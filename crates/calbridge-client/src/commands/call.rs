//! Call command: run one calendar command on a running module.

use std::path::PathBuf;
use std::time::Duration;

use calbridge_protocol::{CommandResult, ProtocolError, Request, Response};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::socket::SocketClient;

/// Socket timeout when the command itself is unbounded. Covers a token
/// exchange plus one API request at their own 30 s limits.
const UNBOUNDED_COMMAND_WAIT: Duration = Duration::from_secs(75);

/// Extra time granted on top of the command timeout for the round trip.
const ROUND_TRIP_SLACK: Duration = Duration::from_secs(5);

/// Sends `command` and prints the result as JSON.
pub async fn run(socket: PathBuf, timeout: Option<f64>, command: &str) -> ClientResult<()> {
    let client = SocketClient::new(socket, socket_timeout(timeout));
    let result = execute(&client, command, timeout).await?;
    let json = serde_json::to_string_pretty(&result).map_err(ProtocolError::from)?;
    println!("{json}");
    Ok(())
}

/// Parses `command` and sends it as a `do_command` request.
pub async fn execute(
    client: &SocketClient,
    command: &str,
    timeout: Option<f64>,
) -> ClientResult<CommandResult> {
    let command: Value = serde_json::from_str(command)
        .map_err(|e| ClientError::InvalidCommand(format!("command is not valid JSON: {e}")))?;

    match client.call(Request::do_command(command, timeout)).await? {
        Response::CommandResult { result } => Ok(result),
        other => Err(ClientError::UnexpectedResponse(format!(
            "do_command answered {other:?}"
        ))),
    }
}

fn socket_timeout(timeout: Option<f64>) -> Duration {
    timeout
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .map(|limit| limit + ROUND_TRIP_SLACK)
        .unwrap_or(UNBOUNDED_COMMAND_WAIT)
}
