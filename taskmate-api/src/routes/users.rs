/// User listing endpoint
///
/// Backs the share picker on the task creation form: every registered
/// user except the caller.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use taskmate_core::auth::authorization::Caller;

use super::auth::UserResponse;

/// List every other registered user
///
/// # Endpoint
///
/// ```text
/// GET /v1/users/peers
/// Authorization: Bearer <token>
/// ```
pub async fn list_peers(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let peers = state.identity().list_peers(&caller).await?;
    Ok(Json(peers.into_iter().map(UserResponse::from).collect()))
}
