use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderName;
use catfinder_core::{Config, CredentialSource, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    credentials: Arc<dyn CredentialSource>,
    http_client: reqwest::Client,
    credential_header: HeaderName,
}

impl AppState {
    pub fn new(config: Config, credentials: Arc<dyn CredentialSource>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.upstream.timeout_secs)))
            .build()
            .context("Failed to build upstream HTTP client")?;

        let credential_header = HeaderName::from_bytes(config.credentials.header_name.as_bytes())
            .with_context(|| {
                format!(
                    "Invalid credential header name: {:?}",
                    config.credentials.header_name
                )
            })?;

        Ok(Self {
            config,
            credentials,
            http_client,
            credential_header,
        })
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::new(&self.config, self.credentials.api_key().is_some())
    }

    pub fn credentials(&self) -> &dyn CredentialSource {
        self.credentials.as_ref()
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub fn credential_header(&self) -> &HeaderName {
        &self.credential_header
    }

    /// Absolute upstream URL for an already validated endpoint path.
    pub fn upstream_url(&self, endpoint: &str) -> String {
        format!(
            "{}{}",
            self.config.upstream.base_url.trim_end_matches('/'),
            endpoint
        )
    }
}
