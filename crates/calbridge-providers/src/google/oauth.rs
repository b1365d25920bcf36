//! Service-account authentication for Google APIs.
//!
//! Key parsing, assertion signing and the token exchange are handled by
//! `yup_oauth2`. This module adds the adapter's error mapping on top:
//!
//! 1. `reconfigure` reads the key file and builds an authenticator
//! 2. The first API call exchanges a signed assertion at the key's `token_uri`
//! 3. The authenticator keeps the access token in memory until shortly
//!    before it expires

use std::fmt;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};

use crate::error::{ProviderError, ProviderResult};

/// Scope granting read/write access to calendars.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Reads and checks a service-account key file.
pub async fn load_service_account_key(path: impl AsRef<Path>) -> ProviderResult<ServiceAccountKey> {
    let path = path.as_ref();
    let key = yup_oauth2::read_service_account_key(path).await.map_err(|e| {
        ProviderError::credential(format!(
            "failed to read service account file {}: {}",
            path.display(),
            e
        ))
        .with_source(e)
    })?;
    check_key(key)
}

fn check_key(key: ServiceAccountKey) -> ProviderResult<ServiceAccountKey> {
    if let Some(ref kind) = key.key_type
        && kind != "service_account"
    {
        return Err(ProviderError::credential(format!(
            "expected a service_account key, got '{}'",
            kind
        )));
    }
    if key.client_email.is_empty() {
        return Err(ProviderError::credential(
            "service account file has an empty client_email",
        ));
    }
    Ok(key)
}

/// Mints access tokens for one service account.
pub struct ServiceAccountAuth {
    client_email: String,
    token_uri: String,
    authenticator: DefaultAuthenticator,
    timeout: Duration,
}

impl fmt::Debug for ServiceAccountAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountAuth")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountAuth {
    /// Prepares authentication for a key.
    ///
    /// Fails with a credential error if the private key is not a usable RSA
    /// key. No network access happens here; `timeout` bounds each later
    /// token request.
    pub async fn new(key: ServiceAccountKey, timeout: Duration) -> ProviderResult<Self> {
        // Several rustls providers can end up linked in; pick one explicitly.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client_email = key.client_email.clone();
        let token_uri = key.token_uri.clone();

        let authenticator = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| {
                ProviderError::credential(format!("invalid service account private key: {}", e))
                    .with_source(e)
            })?;

        debug!(%client_email, %token_uri, "loaded service account key");

        Ok(Self {
            client_email,
            token_uri,
            authenticator,
            timeout,
        })
    }

    /// Returns the service-account identity.
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Returns a valid access token, exchanging a new assertion if needed.
    pub async fn access_token(&self) -> ProviderResult<String> {
        let token = tokio::time::timeout(self.timeout, self.authenticator.token(&[CALENDAR_SCOPE]))
            .await
            .map_err(|_| {
                ProviderError::remote(format!(
                    "token request to {} did not complete within {:?}",
                    self.token_uri, self.timeout
                ))
            })?
            .map_err(|e| ProviderError::remote(format!("token request failed: {}", e)))?;

        let access_token = token
            .token()
            .ok_or_else(|| ProviderError::remote("token response has no access token"))?;

        info!(client_email = %self.client_email, "obtained access token");
        Ok(access_token.to_string())
    }
}
