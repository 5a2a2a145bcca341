use reqwest::header::HeaderName;

use super::{
    types::{ClientConfig, Config},
    ConfigError,
};
use crate::api::ApiTransport;

/// Validate the gateway's configuration
/// Currently validates:
/// - Server port is not 0
/// - Upstream URL is http(s)
/// - Upstream timeout is not 0
/// - At least one credential env name, and a usable header name
///
/// The `[client]` section is not checked here; it only matters to library
/// consumers and is checked by [`validate_client_config`].
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    check_http_url("upstream.base_url", &config.upstream.base_url)?;

    if config.upstream.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "upstream.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config
        .credentials
        .env_names
        .iter()
        .all(|name| name.trim().is_empty())
    {
        return Err(ConfigError::ValidationError(
            "credentials.env_names must name at least one variable".to_string(),
        ));
    }

    if HeaderName::from_bytes(config.credentials.header_name.as_bytes()).is_err() {
        return Err(ConfigError::ValidationError(format!(
            "credentials.header_name is not a valid header name: {:?}",
            config.credentials.header_name
        )));
    }

    Ok(())
}

/// Validate the client transport: its URL must be http(s).
pub fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    match &config.transport {
        ApiTransport::Proxy { gateway_url } => check_http_url("client.gateway_url", gateway_url),
        ApiTransport::Direct { base_url } => check_http_url("client.base_url", base_url),
    }
}

fn check_http_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{} must be an http(s) URL, got {:?}",
            field, url
        )))
    }
}
