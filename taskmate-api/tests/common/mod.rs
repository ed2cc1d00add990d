/// Common test utilities for integration tests
///
/// Provides a `TestContext` with an in-memory SQLite database, a fully
/// built router, and helpers for driving the API over `tower::Service`:
/// registering users, logging in for tokens, and issuing authenticated
/// JSON requests.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use taskmate_api::app::{build_router, AppState};
use taskmate_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use taskmate_core::db::migrations::run_migrations;
use tower::ServiceExt as _;

/// Test context containing the database pool and the built app
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        // Each connection to "sqlite::memory:" is its own database, so
        // the pool must be capped at a single connection.
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: "integration-test-secret-key-0123456789abcdef".to_string(),
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Sends a request through the router and returns the response
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Issues a JSON request, optionally authenticated
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let body = match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    /// Registers a user via the API and returns the response JSON
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        if let Some(role) = role {
            payload["role"] = serde_json::Value::String(role.to_string());
        }

        let response = self
            .request("POST", "/v1/auth/register", None, Some(payload))
            .await;
        let status = response.status();
        let json = read_json(response).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", json);
        json
    }

    /// Logs a user in and returns their session token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/v1/auth/login",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
            )
            .await;
        let status = response.status();
        let json = read_json(response).await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", json);
        json["access_token"].as_str().unwrap().to_string()
    }

    /// Registers and logs in, returning the session token
    pub async fn signup(&self, username: &str, role: Option<&str>) -> String {
        let email = format!("{}@example.com", username);
        self.register(username, &email, "password123", role).await;
        self.login(username, "password123").await
    }
}

/// Reads a response body as JSON
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}
