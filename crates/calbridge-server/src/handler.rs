//! Routes host requests into the calendar adapter.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{Span, debug, info, warn};

use calbridge_protocol::{ErrorResponse, Request, Response};
use calbridge_providers::{CalendarAdapter, ProviderError};

use crate::error::{ServerError, ServerResult};
use crate::signals::ShutdownHandle;
use crate::socket::Connection;

/// Handles requests on behalf of one adapter instance.
#[derive(Clone)]
pub struct RequestHandler {
    adapter: Arc<CalendarAdapter>,
    shutdown: ShutdownHandle,
}

impl RequestHandler {
    /// Creates a handler over a shared adapter.
    pub fn new(adapter: Arc<CalendarAdapter>, shutdown: ShutdownHandle) -> Self {
        Self { adapter, shutdown }
    }

    /// Handles a single request and returns the response.
    #[tracing::instrument(skip(self, request), fields(request_type = request.kind(), duration_ms))]
    pub async fn handle(&self, request: &Request) -> Response {
        let start = Instant::now();

        let response = match request {
            Request::ValidateConfig { attributes } => {
                debug!("Handling ValidateConfig request");
                match CalendarAdapter::validate_config(attributes) {
                    Ok((required, optional)) => Response::Validated { required, optional },
                    Err(err) => error_response(&err),
                }
            }
            Request::Reconfigure {
                attributes,
                dependencies,
            } => {
                if !dependencies.is_empty() {
                    debug!(count = dependencies.len(), "Ignoring resolved dependencies");
                }
                match self.adapter.reconfigure(attributes).await {
                    Ok(()) => Response::Ok,
                    Err(err) => error_response(&err),
                }
            }
            Request::DoCommand {
                command,
                timeout_secs,
            } => match command_timeout(*timeout_secs) {
                Ok(timeout) => match self.adapter.do_command(command.clone(), timeout).await {
                    Ok(result) => Response::command_result(result),
                    Err(err) => error_response(&err),
                },
                Err(err) => error_response(&err),
            },
            Request::Ping => Response::Pong,
            Request::Shutdown => {
                info!("Handling Shutdown request");
                self.shutdown.trigger();
                Response::Ok
            }
        };

        let duration = start.elapsed();
        if tracing::enabled!(tracing::Level::DEBUG) {
            Span::current().record("duration_ms", duration.as_millis());
            debug!(
                request_type = request.kind(),
                duration_ms = duration.as_millis(),
                "Request handled"
            );
        }

        response
    }

    /// Serves one connection until the host closes it or asks to shut down.
    pub async fn handle_connection(&self, mut conn: Connection) -> ServerResult<()> {
        loop {
            match conn.read_request().await {
                Ok(Some(envelope)) => {
                    let response = self.handle(&envelope.payload).await;
                    conn.respond(&envelope.request_id, response).await?;

                    if self.shutdown.is_shutdown() {
                        return Err(ServerError::Shutdown);
                    }
                }
                Ok(None) => {
                    debug!("Host disconnected");
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, "Error reading request");
                    return Err(e);
                }
            }
        }
    }
}

/// Converts the wire timeout into a duration.
///
/// Absent means unbounded; anything that is not a positive finite number of
/// seconds is rejected.
fn command_timeout(timeout_secs: Option<f64>) -> Result<Option<Duration>, ProviderError> {
    let Some(secs) = timeout_secs else {
        return Ok(None);
    };
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ProviderError::invalid_command(format!(
            "timeout must be a positive number of seconds, got {secs}"
        )));
    }
    Duration::try_from_secs_f64(secs)
        .map(Some)
        .map_err(|e| ProviderError::invalid_command(format!("invalid timeout {secs}: {e}")))
}

fn error_response(err: &ProviderError) -> Response {
    warn!(code = %err.code(), error = %err, "Request failed");
    Response::from_error(ErrorResponse::from(err))
}

/// Builds the per-connection callback for [`SocketServer::run`](crate::SocketServer::run).
pub fn make_connection_handler(
    handler: RequestHandler,
) -> impl Fn(Connection) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync + 'static {
    move |conn| {
        let handler = handler.clone();
        Box::pin(async move {
            if let Err(e) = handler.handle_connection(conn).await
                && !matches!(e, ServerError::Shutdown)
            {
                warn!(error = %e, "Connection handler error");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::SignalHandler;
    use calbridge_protocol::ErrorCode;
    use serde_json::{Map, Value, json};

    fn handler() -> (RequestHandler, SignalHandler) {
        let signals = SignalHandler::new();
        let handler = RequestHandler::new(
            Arc::new(CalendarAdapter::new()),
            signals.shutdown_handle(),
        );
        (handler, signals)
    }

    fn attributes(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn error_code(response: &Response) -> ErrorCode {
        response.as_error().expect("expected an error").code
    }

    #[tokio::test]
    async fn ping_returns_pong() {
        let (handler, _signals) = handler();
        assert_eq!(handler.handle(&Request::Ping).await, Response::Pong);
    }

    #[tokio::test]
    async fn validate_config_accepts_complete_attributes() {
        let (handler, _signals) = handler();
        let request = Request::validate_config(attributes(json!({
            "calendar_id": "primary",
            "service_account_file": "/nonexistent/key.json",
        })));

        assert_eq!(handler.handle(&request).await, Response::validated());
    }

    #[tokio::test]
    async fn validate_config_reports_missing_attribute() {
        let (handler, _signals) = handler();
        let request = Request::validate_config(attributes(json!({"calendar_id": "primary"})));

        let response = handler.handle(&request).await;
        let error = response.as_error().unwrap();
        assert_eq!(error.code, ErrorCode::ConfigurationError);
        assert_eq!(
            error.message,
            "A 'service_account_file' must be defined in the configuration."
        );
    }

    #[tokio::test]
    async fn reconfigure_with_missing_key_file_is_credential_error() {
        let (handler, _signals) = handler();
        let request = Request::reconfigure(attributes(json!({
            "calendar_id": "primary",
            "service_account_file": "/nonexistent/key.json",
        })));

        let response = handler.handle(&request).await;
        assert_eq!(error_code(&response), ErrorCode::CredentialError);
    }

    #[tokio::test]
    async fn unknown_command_wins_over_not_configured() {
        let (handler, _signals) = handler();
        let request = Request::do_command(json!({"unsupported_key": {}}), None);

        let response = handler.handle(&request).await;
        assert_eq!(error_code(&response), ErrorCode::UnknownCommand);
    }

    #[tokio::test]
    async fn command_before_reconfigure_is_not_configured() {
        let (handler, _signals) = handler();
        let request = Request::do_command(json!({"get_events": {}}), None);

        let response = handler.handle(&request).await;
        assert_eq!(error_code(&response), ErrorCode::NotConfigured);
    }

    #[tokio::test]
    async fn non_positive_timeout_is_invalid_command() {
        let (handler, _signals) = handler();
        for timeout in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let request = Request::do_command(json!({"get_events": {}}), Some(timeout));
            let response = handler.handle(&request).await;
            assert_eq!(error_code(&response), ErrorCode::InvalidCommand, "{timeout}");
        }
    }

    #[tokio::test]
    async fn shutdown_triggers_handle() {
        let (handler, signals) = handler();
        assert_eq!(handler.handle(&Request::Shutdown).await, Response::Ok);
        assert!(signals.shutdown_handle().is_shutdown());
    }

    #[test]
    fn command_timeout_conversion() {
        assert_eq!(command_timeout(None).unwrap(), None);
        assert_eq!(
            command_timeout(Some(1.5)).unwrap(),
            Some(Duration::from_millis(1500))
        );
        assert!(command_timeout(Some(0.0)).is_err());
    }
}
