//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a real SQLite store in a temp directory and mock playlist services,
//! enabling E2E testing without network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use beerparty_core::{
    config::{DatabaseConfig, ServerConfig},
    playlist::{Authorizer, CatalogSearch},
    testing::{MockAuthorizer, MockCatalogSearch},
    BeerStore, Config, PartyPlanner, PlaylistOrchestrator, SqliteBeerStore,
};

/// Re-export fixtures for test convenience
pub use beerparty_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server with fully controllable mocks for:
/// - Token issuing (MockAuthorizer)
/// - Playlist search (MockCatalogSearch)
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_beer_creation() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post("/beer", json!({
///         "beerStyle": "IPA", "minTemp": -7, "maxTemp": 10
///     })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Beer store backing the router
    pub store: Arc<SqliteBeerStore>,
    /// Mock authorizer - absent when the playlist service is disabled
    pub authorizer: Option<Arc<MockAuthorizer>>,
    /// Mock catalog search - configure playlists per style
    pub search: Arc<MockCatalogSearch>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with a working token issuer.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            spotify: None,
        };

        let store = Arc::new(SqliteBeerStore::new(&db_path).expect("Failed to create beer store"));
        let search = Arc::new(MockCatalogSearch::new());

        let authorizer = match test_config.playlists {
            PlaylistMode::Disabled => None,
            PlaylistMode::Working => Some(Arc::new(MockAuthorizer::with_token("test-token"))),
            PlaylistMode::FailingToken => Some(Arc::new(MockAuthorizer::failing())),
        };

        let party = authorizer.as_ref().map(|authorizer| {
            let orchestrator = PlaylistOrchestrator::new(
                Arc::clone(authorizer) as Arc<dyn Authorizer>,
                Arc::clone(&search) as Arc<dyn CatalogSearch>,
            );
            PartyPlanner::new(Arc::clone(&store) as Arc<dyn BeerStore>, orchestrator)
        });

        let state = Arc::new(beerparty_server::state::AppState::new(
            config,
            Arc::clone(&store) as Arc<dyn BeerStore>,
            party,
        ));

        let router = beerparty_server::api::create_router(state);

        Self {
            router,
            store,
            authorizer,
            search,
            temp_dir,
        }
    }

    /// Create a beer through the API and return its id.
    pub async fn create_beer(&self, style: &str, min_temp: f64, max_temp: f64) -> String {
        let response = self
            .post(
                "/beer",
                serde_json::json!({
                    "beerStyle": style,
                    "minTemp": min_temp,
                    "maxTemp": max_temp,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["_id"]
            .as_str()
            .expect("Created beer has no id")
            .to_string()
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// How the playlist side of the fixture behaves.
#[derive(Debug, Clone, Copy, Default)]
pub enum PlaylistMode {
    /// Token issuer answers with a fixed token
    #[default]
    Working,
    /// Token issuer rejects every request
    FailingToken,
    /// No playlist provider configured
    Disabled,
}

/// Configuration for test fixture.
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    pub playlists: PlaylistMode,
}

impl TestConfig {
    pub fn failing_token() -> Self {
        Self {
            playlists: PlaylistMode::FailingToken,
        }
    }

    pub fn without_playlists() -> Self {
        Self {
            playlists: PlaylistMode::Disabled,
        }
    }
}
