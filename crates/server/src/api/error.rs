//! Gateway error responses.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use catfinder_core::MISSING_CREDENTIAL_MESSAGE;
use serde::Serialize;
use thiserror::Error;

/// `Cache-Control` value set on every gateway response.
pub const NO_STORE: HeaderValue = HeaderValue::from_static("no-store");

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failures the gateway reports itself, as opposed to mirrored upstream errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Missing endpoint query parameter.")]
    MissingEndpoint,

    #[error("Invalid endpoint query parameter.")]
    InvalidEndpoint,

    #[error("{}", MISSING_CREDENTIAL_MESSAGE)]
    MissingCredential,

    #[error("Failed to reach The Cat API.")]
    UpstreamUnreachable,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingEndpoint | GatewayError::InvalidEndpoint => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::UpstreamUnreachable => StatusCode::BAD_GATEWAY,
        }
    }

    /// Metrics label.
    pub fn outcome(&self) -> &'static str {
        match self {
            GatewayError::MissingEndpoint => "missing_endpoint",
            GatewayError::InvalidEndpoint => "invalid_endpoint",
            GatewayError::MissingCredential => "missing_credential",
            GatewayError::UpstreamUnreachable => "upstream_unreachable",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CACHE_CONTROL, NO_STORE)],
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_status_mapping() {
        assert_eq!(GatewayError::MissingEndpoint.status(), StatusCode::BAD_REQUEST);
        assert_eq!(GatewayError::InvalidEndpoint.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::MissingCredential.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::UpstreamUnreachable.status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_into_response_body_and_headers() {
        let response = GatewayError::MissingCredential.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "CAT_API_KEY is not configured on the server.");
    }
}
