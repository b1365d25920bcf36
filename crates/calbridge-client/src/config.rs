//! Attribute files for `validate` and `configure`.
//!
//! The host normally hands attributes over the socket; operators keep them
//! in a file instead. JSON is the default, a `.toml` extension switches to
//! TOML:
//!
//! ```toml
//! calendar_id = "primary"
//! service_account_file = "/etc/calbridge/service-account.json"
//! ```

use std::path::Path;

use calbridge_protocol::Attributes;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Reads an attribute map from `path`.
pub fn load_attributes(path: &Path) -> ClientResult<Attributes> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ClientError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let value = if is_toml {
        let table: toml::Table = toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("failed to parse {}: {}", path.display(), e)))?;
        serde_json::to_value(table)
            .map_err(|e| ClientError::Config(format!("failed to convert {}: {}", path.display(), e)))?
    } else {
        serde_json::from_str(&content)
            .map_err(|e| ClientError::Config(format!("failed to parse {}: {}", path.display(), e)))?
    };

    match value {
        Value::Object(attributes) => Ok(attributes),
        _ => Err(ClientError::Config(format!(
            "{} must contain an object of attributes",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_json_attributes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attributes.json");
        std::fs::write(
            &path,
            r#"{"calendar_id": "primary", "service_account_file": "/keys/sa.json"}"#,
        )
        .unwrap();

        let attributes = load_attributes(&path).unwrap();
        assert_eq!(attributes["calendar_id"], "primary");
        assert_eq!(attributes["service_account_file"], "/keys/sa.json");
    }

    #[test]
    fn load_toml_attributes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attributes.toml");
        std::fs::write(
            &path,
            "calendar_id = \"team\"\nservice_account_file = \"/keys/sa.json\"\n",
        )
        .unwrap();

        let attributes = load_attributes(&path).unwrap();
        assert_eq!(attributes["calendar_id"], "team");
        assert_eq!(attributes.len(), 2);
    }

    #[test]
    fn load_rejects_non_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attributes.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = load_attributes(&path).unwrap_err();
        assert!(err.to_string().contains("must contain an object"));
    }

    #[test]
    fn load_missing_file() {
        let err = load_attributes(Path::new("/nonexistent/attributes.json")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
