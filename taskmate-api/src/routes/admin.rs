/// Admin endpoints
///
/// The role check lives in the workflow (`list_all` rejects non-admins),
/// so this route only needs the session middleware.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use taskmate_core::auth::authorization::Caller;
use taskmate_core::models::task::Task;

/// List every task in the store, across all users
///
/// # Endpoint
///
/// ```text
/// GET /v1/admin/tasks
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not an admin
pub async fn list_all_tasks(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.workflow().list_all(&caller).await?;
    Ok(Json(tasks))
}
