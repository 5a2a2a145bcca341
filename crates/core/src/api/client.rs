//! reqwest-backed [`CatApi`] implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::endpoint::Endpoint;
use super::types::{Breed, Image};
use super::{ApiError, ApiTransport, CatApi, GENERIC_FAILURE_MESSAGE, NETWORK_FAILURE_MESSAGE};
use crate::config::{validate_client_config, ClientConfig};

const UNREADABLE_RESPONSE_MESSAGE: &str = "The Cat API returned an unreadable response.";

/// Breed/image API client.
///
/// Holds its transport explicitly; there is no process-wide base URL or key.
/// No timeout is applied and no retries are made.
#[derive(Debug, Clone)]
pub struct CatApiClient {
    client: Client,
    transport: ApiTransport,
}

impl CatApiClient {
    /// Create a new client for the given transport.
    pub fn new(transport: ApiTransport) -> Result<Self, ApiError> {
        let client = Client::builder().build().map_err(|e| {
            ApiError::Configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self::with_http_client(transport, client))
    }

    /// Create a client from the `[client]` config section.
    ///
    /// An unusable transport URL is an [`ApiError::Configuration`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        validate_client_config(config).map_err(|e| ApiError::Configuration(e.to_string()))?;
        Self::new(config.transport.clone())
    }

    /// Create a client reusing an existing reqwest client.
    pub fn with_http_client(transport: ApiTransport, client: Client) -> Self {
        Self { client, transport }
    }

    pub fn transport(&self) -> &ApiTransport {
        &self.transport
    }

    /// Issue `GET endpoint` and return the decoded JSON body.
    ///
    /// `endpoint` must be a rooted relative path; anything else fails with
    /// [`ApiError::Validation`] before any I/O.
    pub async fn request(&self, endpoint: &str) -> Result<Value, ApiError> {
        let endpoint = Endpoint::parse(endpoint)?;
        self.fetch(&endpoint).await
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError> {
        debug!("Cat API request: endpoint='{}'", endpoint);

        let request = match &self.transport {
            ApiTransport::Proxy { gateway_url } => self
                .client
                .get(gateway_url)
                .query(&[("endpoint", endpoint.as_str())]),
            ApiTransport::Direct { base_url } => self
                .client
                .get(format!("{}{}", base_url.trim_end_matches('/'), endpoint)),
        };

        let response = request.send().await.map_err(|e| {
            warn!("Cat API transport failure for '{}': {}", endpoint, e);
            ApiError::Network(NETWORK_FAILURE_MESSAGE.to_string())
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!("Cat API body read failed for '{}': {}", endpoint, e);
            ApiError::Network(NETWORK_FAILURE_MESSAGE.to_string())
        })?;

        if !status.is_success() {
            let message = extract_error_message(&body);
            warn!(
                "Cat API returned {} for '{}': {}",
                status.as_u16(),
                endpoint,
                message
            );
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to parse Cat API response for '{}': {}", endpoint, e);
            ApiError::Upstream {
                status: status.as_u16(),
                message: UNREADABLE_RESPONSE_MESSAGE.to_string(),
            }
        })
    }
}

/// Best-effort message from an error body: `{"error": ..}` or `{"message": ..}`.
fn extract_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "message"].iter().find_map(|field| {
                value
                    .get(field)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(String::from)
            })
        })
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

#[async_trait]
impl CatApi for CatApiClient {
    async fn get_breeds(&self) -> Result<Vec<Breed>, ApiError> {
        self.fetch(&Endpoint::breeds()).await
    }

    async fn search_breeds(&self, term: &str) -> Result<Vec<Breed>, ApiError> {
        self.fetch(&Endpoint::breed_search(term)).await
    }

    async fn get_breed(&self, breed_id: &str) -> Result<Breed, ApiError> {
        self.fetch(&Endpoint::breed(breed_id)).await
    }

    async fn breed_images(&self, breed_id: &str, limit: u32) -> Result<Vec<Image>, ApiError> {
        self.fetch(&Endpoint::breed_images(breed_id, limit)).await
    }

    async fn random_images(&self, limit: u32) -> Result<Vec<Image>, ApiError> {
        self.fetch(&Endpoint::random_images(limit)).await
    }

    async fn get_image(&self, image_id: &str) -> Result<Image, ApiError> {
        self.fetch(&Endpoint::image(image_id)).await
    }
}
