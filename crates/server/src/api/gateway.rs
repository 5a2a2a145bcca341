//! The credential-injecting proxy endpoint.
//!
//! `GET /api/v1/cat-api?endpoint=<path>` forwards `<path>` to the upstream API
//! with the server-held key attached, and mirrors status, body and content
//! type back. Nothing is cached and nothing is retried.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use catfinder_core::validate_endpoint;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::{GatewayError, NO_STORE};
use crate::metrics::{GATEWAY_REQUESTS_TOTAL, UPSTREAM_REQUEST_DURATION};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GatewayParams {
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// A mirrored upstream response.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: HeaderValue,
    pub body: Bytes,
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [
                (header::CONTENT_TYPE, self.content_type),
                (header::CACHE_CONTROL, NO_STORE),
            ],
            self.body,
        )
            .into_response()
    }
}

/// GET /api/v1/cat-api
pub async fn forward(
    State(state): State<Arc<AppState>>,
    params: Result<Query<GatewayParams>, QueryRejection>,
) -> Result<UpstreamResponse, GatewayError> {
    let result = match params {
        Ok(Query(params)) => forward_endpoint(&state, params.endpoint).await,
        Err(rejection) => {
            debug!("Rejecting unparseable gateway query: {}", rejection);
            Err(GatewayError::InvalidEndpoint)
        }
    };

    let outcome = match &result {
        Ok(_) => "forwarded",
        Err(e) => e.outcome(),
    };
    GATEWAY_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();

    result
}

/// Validate, attach the credential and forward one endpoint.
///
/// Checks run in order: endpoint present, endpoint relative, credential
/// configured. No upstream call happens unless all three pass.
pub async fn forward_endpoint(
    state: &AppState,
    endpoint: Option<String>,
) -> Result<UpstreamResponse, GatewayError> {
    let endpoint = endpoint
        .filter(|e| !e.is_empty())
        .ok_or(GatewayError::MissingEndpoint)?;

    validate_endpoint(&endpoint).map_err(|_| {
        debug!("Rejecting endpoint {:?}", endpoint);
        GatewayError::InvalidEndpoint
    })?;

    let api_key = state.credentials().require_api_key().map_err(|_| {
        warn!(
            "No upstream credential available from {} source",
            state.credentials().source_name()
        );
        GatewayError::MissingCredential
    })?;

    let url = state.upstream_url(&endpoint);
    debug!("Forwarding '{}' upstream", endpoint);

    let start = Instant::now();
    let response = state
        .http_client()
        .get(&url)
        .header(state.credential_header().clone(), api_key)
        .send()
        .await
        .map_err(|e| {
            warn!("Upstream request for '{}' failed: {}", endpoint, e);
            GatewayError::UpstreamUnreachable
        })?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    let body = response.bytes().await.map_err(|e| {
        warn!("Reading upstream body for '{}' failed: {}", endpoint, e);
        GatewayError::UpstreamUnreachable
    })?;

    UPSTREAM_REQUEST_DURATION
        .with_label_values(&[status.as_str()])
        .observe(start.elapsed().as_secs_f64());

    if !status.is_success() {
        debug!("Upstream returned {} for '{}'", status, endpoint);
    }

    Ok(UpstreamResponse {
        status,
        content_type,
        body,
    })
}
