//! Client for the breed/image API, reached through the proxy gateway or directly.
//!
//! All failures are normalized into [`ApiError`] before they leave this module;
//! no transport error types cross the boundary.

mod client;
mod endpoint;
mod types;

pub use client::CatApiClient;
pub use endpoint::{validate_endpoint, Endpoint};
pub use types::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when a failed response carries no readable error text.
pub const GENERIC_FAILURE_MESSAGE: &str = "The Cat API request failed.";

/// Message used for transport-level failures.
pub const NETWORK_FAILURE_MESSAGE: &str = "Could not reach The Cat API.";

/// Errors surfaced by the client, resolver and browse operations.
///
/// Every variant renders as a short human-readable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed input; never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// Missing server-side credential.
    #[error("{0}")]
    Configuration(String),

    /// Transport failure (DNS, connection refused, timeout, truncated body).
    #[error("{0}")]
    Network(String),

    /// Non-2xx response, or a 2xx body that could not be decoded.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Domain-level absence: no breed match, no image.
    #[error("{0}")]
    NotFound(String),
}

/// Discriminant of [`ApiError`], for branching without matching on payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    Validation,
    Configuration,
    Network,
    Upstream,
    NotFound,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Validation(_) => ApiErrorKind::Validation,
            ApiError::Configuration(_) => ApiErrorKind::Configuration,
            ApiError::Network(_) => ApiErrorKind::Network,
            ApiError::Upstream { .. } => ApiErrorKind::Upstream,
            ApiError::NotFound(_) => ApiErrorKind::NotFound,
        }
    }

    /// The human-readable message, without any kind prefix.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(m)
            | ApiError::Configuration(m)
            | ApiError::Network(m)
            | ApiError::NotFound(m) => m,
            ApiError::Upstream { message, .. } => message,
        }
    }
}

/// How the client reaches the API.
///
/// Neither transport attaches a credential; the gateway does that server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiTransport {
    /// `GET <gateway_url>?endpoint=<encoded path>`
    Proxy { gateway_url: String },
    /// `GET <base_url><path>`
    Direct { base_url: String },
}

/// Breed/image operations used by the resolver and the browse layer.
///
/// Every call is a single attempt; retry policy belongs to callers.
#[async_trait]
pub trait CatApi: Send + Sync {
    /// `GET /breeds`
    async fn get_breeds(&self) -> Result<Vec<Breed>, ApiError>;

    /// `GET /breeds/search?q=<term>`, with the term sent as given.
    async fn search_breeds(&self, term: &str) -> Result<Vec<Breed>, ApiError>;

    /// `GET /breeds/{id}`
    async fn get_breed(&self, breed_id: &str) -> Result<Breed, ApiError>;

    /// `GET /images/search?limit=<n>&breed_ids=<id>`
    async fn breed_images(&self, breed_id: &str, limit: u32) -> Result<Vec<Image>, ApiError>;

    /// `GET /images/search?limit=<n>`
    async fn random_images(&self, limit: u32) -> Result<Vec<Image>, ApiError>;

    /// `GET /images/{id}`
    async fn get_image(&self, image_id: &str) -> Result<Image, ApiError>;
}
