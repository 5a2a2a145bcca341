use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::api::ApiTransport;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Upstream breed/image API the gateway forwards to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Base URL without trailing slash (default: https://api.thecatapi.com/v1).
    #[serde(default = "default_upstream_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_url(),
            timeout_secs: default_timeout(),
        }
    }
}

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.thecatapi.com/v1";

fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Where the gateway looks for the upstream secret and how it sends it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// Environment variable names, checked in order; first non-empty value wins.
    #[serde(default = "default_env_names")]
    pub env_names: Vec<String>,
    /// Header carrying the secret on upstream requests.
    #[serde(default = "default_header_name")]
    pub header_name: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            env_names: default_env_names(),
            header_name: default_header_name(),
        }
    }
}

fn default_env_names() -> Vec<String> {
    ["CAT_API_KEY", "THECATAPI_API_KEY", "VITE_CAT_API_KEY"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_header_name() -> String {
    "x-api-key".to_string()
}

/// Settings for library consumers building a [`crate::CatApiClient`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_transport")]
    pub transport: ApiTransport,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
        }
    }
}

fn default_transport() -> ApiTransport {
    ApiTransport::Proxy {
        gateway_url: "http://127.0.0.1:8080/api/v1/cat-api".to_string(),
    }
}

/// Sanitized config for API responses (secrets never included)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub credentials: SanitizedCredentialsConfig,
}

/// Credential lookup settings plus whether a key is currently available.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCredentialsConfig {
    pub env_names: Vec<String>,
    pub header_name: String,
    pub api_key_configured: bool,
}

impl SanitizedConfig {
    /// Build from config; `api_key_configured` is evaluated by the caller at request time.
    pub fn new(config: &Config, api_key_configured: bool) -> Self {
        Self {
            server: config.server.clone(),
            upstream: config.upstream.clone(),
            credentials: SanitizedCredentialsConfig {
                env_names: config.credentials.env_names.clone(),
                header_name: config.credentials.header_name.clone(),
                api_key_configured,
            },
        }
    }
}
