/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with
/// all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskmate_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::SqlitePool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = SqlitePool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use taskmate_core::auth::{authorization::Caller, session};
use taskmate_core::identity::Identity;
use taskmate_core::workflow::TaskWorkflow;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the secret used for session token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Identity & Access service bound to this state's store
    pub fn identity(&self) -> Identity {
        Identity::new(self.db.clone())
    }

    /// Task Workflow service bound to this state's store
    pub fn workflow(&self) -> TaskWorkflow {
        TaskWorkflow::new(self.db.clone())
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                  # Health check (public)
/// └── /v1/                     # API v1 (versioned)
///     ├── /auth/
///     │   ├── POST /register   # Create account (public)
///     │   └── POST /login      # Authenticate, returns session token (public)
///     ├── /tasks               # Authenticated
///     │   ├── GET    /         # Dashboard: my tasks + shared with me
///     │   ├── POST   /         # Create task (optionally shared)
///     │   ├── GET    /:id      # Fetch one task (creator-or-admin)
///     │   ├── PUT    /:id      # Edit title/description/status
///     │   └── DELETE /:id      # Delete (creator-or-admin)
///     ├── /users/peers         # Share-candidate list (authenticated)
///     └── /admin/tasks         # Every task in the store (admin only)
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Task routes (require a session token)
    let task_routes = Router::new()
        .route("/", get(routes::tasks::dashboard))
        .route("/", post(routes::tasks::create_task))
        .route("/:id", get(routes::tasks::get_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    // Peer listing for the share picker (authenticated)
    let user_routes = Router::new()
        .route("/peers", get(routes::users::list_peers))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    // Admin dashboard (authenticated; role checked in the workflow)
    let admin_routes = Router::new()
        .route("/tasks", get(routes::admin::list_all_tasks))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes)
        .nest("/users", user_routes)
        .nest("/admin", admin_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Session authentication middleware layer
///
/// Extracts and validates the bearer token from the Authorization header,
/// then injects the authenticated `Caller` into request extensions for
/// handlers to pick up with the `Extension` extractor.
async fn session_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| crate::error::ApiError::BadRequest("Expected Bearer token".to_string()))?;

    let claims = session::validate_token(token, state.jwt_secret())
        .map_err(|e| crate::error::ApiError::Unauthorized(e.to_string()))?;

    req.extensions_mut().insert(Caller::from_claims(&claims));

    Ok(next.run(req).await)
}
