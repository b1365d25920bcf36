//! Fixtures shared by the HTTP tests.

use std::path::{Path, PathBuf};

use calbridge_protocol::Attributes;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Throwaway service-account key (never registered anywhere).
pub const SERVICE_ACCOUNT_JSON: &str = include_str!("../testdata/service_account.json");

/// Public half of the fixture key, for verifying signed assertions.
pub const PUBLIC_KEY_PEM: &str = include_str!("../testdata/service_account.pub.pem");

/// Access token handed out by [`mount_token_endpoint`].
pub const ACCESS_TOKEN: &str = "ya29.test-access-token";

/// Serves `POST /token` with [`ACCESS_TOKEN`].
pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

/// Parses the fixture key with its `token_uri` pointing at `token_uri`.
pub fn service_account_key(token_uri: &str) -> yup_oauth2::ServiceAccountKey {
    let mut key: yup_oauth2::ServiceAccountKey = serde_json::from_str(SERVICE_ACCOUNT_JSON).unwrap();
    key.token_uri = token_uri.to_string();
    key
}

/// Writes the fixture key into `dir` with its `token_uri` pointing at
/// `token_uri`.
pub fn write_key_file(dir: &Path, token_uri: &str) -> PathBuf {
    let mut key: Value = serde_json::from_str(SERVICE_ACCOUNT_JSON).unwrap();
    key["token_uri"] = Value::String(token_uri.to_string());

    let file = dir.join("service_account.json");
    std::fs::write(&file, serde_json::to_vec_pretty(&key).unwrap()).unwrap();
    file
}

/// Builds adapter attributes.
pub fn attributes(calendar_id: &str, service_account_file: &Path) -> Attributes {
    let Value::Object(map) = json!({
        "calendar_id": calendar_id,
        "service_account_file": service_account_file.to_string_lossy(),
    }) else {
        unreachable!()
    };
    map
}
