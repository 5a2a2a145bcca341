//! Common test utilities for gateway testing.
//!
//! This module provides a test fixture that creates an in-process gateway
//! wired to a fake upstream served on a loopback port, so forwarding can be
//! exercised without reaching the real API.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use catfinder_core::{Config, CredentialSource, FixedCredentials};
use catfinder_server::{api::create_router, state::AppState};

/// Key the fixture's gateway attaches upstream unless told otherwise.
pub const TEST_API_KEY: &str = "test-secret-key";

/// One request as seen by the fake upstream.
#[derive(Debug, Clone)]
pub struct UpstreamHit {
    pub path: String,
    pub query: Option<String>,
    pub api_key: Option<String>,
}

/// Canned reply served by the fake upstream.
#[derive(Debug, Clone)]
pub struct CannedReply {
    pub status: StatusCode,
    pub content_type: Option<&'static str>,
    pub body: String,
}

impl CannedReply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.to_string(),
        }
    }
}

impl Default for CannedReply {
    fn default() -> Self {
        Self::json(StatusCode::OK, serde_json::json!([]))
    }
}

#[derive(Default)]
struct UpstreamState {
    hits: Mutex<Vec<UpstreamHit>>,
    reply: Mutex<CannedReply>,
}

/// Loopback server standing in for the upstream API.
pub struct FakeUpstream {
    pub addr: SocketAddr,
    state: Arc<UpstreamState>,
}

impl FakeUpstream {
    pub async fn start() -> Self {
        let state = Arc::new(UpstreamState::default());
        let handler_state = Arc::clone(&state);

        let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap| {
            let state = Arc::clone(&handler_state);
            async move { state.record(uri, headers) }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn set_reply(&self, reply: CannedReply) {
        *self.state.reply.lock().unwrap() = reply;
    }

    pub fn hits(&self) -> Vec<UpstreamHit> {
        self.state.hits.lock().unwrap().clone()
    }
}

impl UpstreamState {
    fn record(&self, uri: Uri, headers: HeaderMap) -> Response {
        self.hits.lock().unwrap().push(UpstreamHit {
            path: uri.path().to_string(),
            query: uri.query().map(String::from),
            api_key: headers
                .get("x-api-key")
                .and_then(|v| v.to_str().ok())
                .map(String::from),
        });

        let reply = self.reply.lock().unwrap().clone();
        let mut response = (reply.status, reply.body).into_response();
        match reply.content_type {
            Some(content_type) => {
                response
                    .headers_mut()
                    .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
            }
            None => {
                response.headers_mut().remove(header::CONTENT_TYPE);
            }
        }
        response
    }
}

/// Test fixture for gateway testing against a fake upstream.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_forwarding() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.get("/api/v1/cat-api?endpoint=%2Fbreeds").await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Fake upstream - configure replies, inspect hits
    pub upstream: FakeUpstream,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub raw_body: String,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture whose gateway holds [`TEST_API_KEY`].
    pub async fn new() -> Self {
        Self::with_credentials(FixedCredentials::new(TEST_API_KEY)).await
    }

    /// Create a fixture with no upstream credential configured.
    pub async fn without_credentials() -> Self {
        Self::with_credentials(FixedCredentials::none()).await
    }

    pub async fn with_credentials(credentials: impl CredentialSource + 'static) -> Self {
        let upstream = FakeUpstream::start().await;
        let router = router_for(&upstream.base_url(), credentials);
        Self { router, upstream }
    }

    /// Send a GET request to the in-process gateway.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let raw_body = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            raw_body,
            body,
        }
    }

    /// Convenience for the proxy route with an already encoded endpoint.
    pub async fn proxy(&self, encoded_endpoint: &str) -> TestResponse {
        self.get(&format!("/api/v1/cat-api?endpoint={}", encoded_endpoint))
            .await
    }
}

/// Build a gateway router forwarding to `base_url`.
pub fn router_for(base_url: &str, credentials: impl CredentialSource + 'static) -> Router {
    let mut config = Config::default();
    config.upstream.base_url = base_url.to_string();
    config.upstream.timeout_secs = 5;

    let state = AppState::new(config, Arc::new(credentials)).expect("Failed to build app state");
    create_router(Arc::new(state))
}

/// Serve `router` on a loopback port and return its address.
#[allow(dead_code)]
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind gateway");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    addr
}

/// Port nothing is listening on.
#[allow(dead_code)]
pub fn closed_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
