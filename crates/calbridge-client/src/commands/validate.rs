//! Validate command: local check of an attributes file.

use std::path::Path;

use calbridge_providers::CalendarAdapter;

use crate::config::load_attributes;
use crate::error::ClientResult;

/// Checks the attributes in `config` the same way the host's
/// `validate_config` would, without touching the key file or the network.
pub fn run(config: &Path) -> ClientResult<()> {
    let attributes = load_attributes(config)?;
    CalendarAdapter::validate_config(&attributes)?;
    println!("Configuration is valid.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use calbridge_providers::ProviderErrorCode;
    use tempfile::tempdir;

    #[test]
    fn valid_attributes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attributes.toml");
        std::fs::write(
            &path,
            "calendar_id = \"primary\"\nservice_account_file = \"/does/not/matter.json\"\n",
        )
        .unwrap();

        run(&path).unwrap();
    }

    #[test]
    fn missing_calendar_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attributes.json");
        std::fs::write(&path, r#"{"service_account_file": "/keys/sa.json"}"#).unwrap();

        let err = run(&path).unwrap_err();
        let ClientError::Provider(err) = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert_eq!(
            err.message(),
            "A 'calendar_id' must be defined in the configuration."
        );
    }
}
