/// Authentication endpoints
///
/// - `POST /v1/auth/register` - Create a new account
/// - `POST /v1/auth/login` - Authenticate and receive a session token
///
/// There is no logout endpoint: sessions are stateless bearer tokens and
/// logging out is the client discarding its token.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskmate_core::auth::session::{create_token, Claims};
use taskmate_core::identity::NewAccount;
use taskmate_core::models::user::{Role, User};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username (globally unique)
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    /// Email address (globally unique)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (stored only as a hash)
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Optional role; defaults to "member", must be "member" or "admin"
    pub role: Option<String>,
}

/// Public view of a user account
///
/// Never carries the password hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The authenticated user
    pub user: UserResponse,

    /// Session token (24h); send as `Authorization: Bearer <token>`
    pub access_token: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "pw1"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Username or email already exists
/// - `422 Unprocessable Entity`: Validation failed (including unknown role)
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    req.validate().map_err(ApiError::from)?;

    let user = state
        .identity()
        .register(NewAccount {
            username: req.username,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Login endpoint
///
/// Verifies credentials and returns a signed session token carrying the
/// caller's id and role.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "pw1"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown username or wrong password (indistinguishable)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate().map_err(ApiError::from)?;

    let user = state
        .identity()
        .authenticate(&req.username, &req.password)
        .await?;

    let claims = Claims::new(user.id, user.role);
    let access_token = create_token(&claims, state.jwt_secret())
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(Json(LoginResponse {
        user: user.into(),
        access_token,
    }))
}
