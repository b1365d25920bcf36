//! Configure command: validate and apply attributes on a running module.

use std::path::{Path, PathBuf};

use calbridge_protocol::{Attributes, Request, Response};

use crate::config::load_attributes;
use crate::error::{ClientError, ClientResult};
use crate::socket::SocketClient;

use super::REQUEST_TIMEOUT;

/// Loads `config` and applies it to the module on `socket`.
pub async fn run(socket: PathBuf, config: &Path) -> ClientResult<()> {
    let attributes = load_attributes(config)?;
    let client = SocketClient::new(socket, REQUEST_TIMEOUT);
    apply(&client, attributes).await?;
    println!("Module configured.");
    Ok(())
}

/// Sends `validate_config` then `reconfigure`, the order the host uses.
pub async fn apply(client: &SocketClient, attributes: Attributes) -> ClientResult<()> {
    match client.call(Request::validate_config(attributes.clone())).await? {
        Response::Validated { .. } => {}
        other => {
            return Err(ClientError::UnexpectedResponse(format!(
                "validate_config answered {other:?}"
            )));
        }
    }

    match client.call(Request::reconfigure(attributes)).await? {
        Response::Ok => Ok(()),
        other => Err(ClientError::UnexpectedResponse(format!(
            "reconfigure answered {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::socket::tests::TestModule;
    use calbridge_protocol::ErrorCode;
    use serde_json::{Value, json};
    use tempfile::tempdir;

    const SERVICE_ACCOUNT_JSON: &str =
        include_str!("../../../calbridge-providers/testdata/service_account.json");

    fn attributes(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn remote_code(err: ClientError) -> ErrorCode {
        match err {
            ClientError::Remote(error) => error.code,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn apply_configures_module() {
        let module = TestModule::start().await;
        let dir = tempdir().unwrap();
        let key_file = dir.path().join("service_account.json");
        std::fs::write(&key_file, SERVICE_ACCOUNT_JSON).unwrap();

        apply(
            &module.client(),
            attributes(json!({
                "calendar_id": "primary",
                "service_account_file": key_file.to_string_lossy(),
            })),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn apply_stops_at_validation() {
        let module = TestModule::start().await;
        let err = apply(&module.client(), attributes(json!({"calendar_id": "primary"})))
            .await
            .unwrap_err();
        assert_eq!(remote_code(err), ErrorCode::ConfigurationError);
    }

    #[tokio::test]
    async fn apply_reports_unreadable_key() {
        let module = TestModule::start().await;
        let err = apply(
            &module.client(),
            attributes(json!({
                "calendar_id": "primary",
                "service_account_file": "/nonexistent/key.json",
            })),
        )
        .await
        .unwrap_err();
        assert_eq!(remote_code(err), ErrorCode::CredentialError);
    }
}
