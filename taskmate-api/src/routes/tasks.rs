/// Task endpoints
///
/// All routes here run behind the session middleware, so every handler
/// receives the authenticated `Caller` from request extensions.
/// Authorization itself lives in the workflow layer; these handlers
/// translate between HTTP and workflow inputs.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskmate_core::auth::authorization::Caller;
use taskmate_core::models::task::Task;
use taskmate_core::workflow::{NewTask, TaskEdit};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Task description
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    /// Optional recipient user id; must be another existing user
    pub shared_with: Option<i64>,
}

/// Update task request
///
/// Full overwrite of the mutable fields. Creator and recipient cannot
/// be changed after creation.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    /// Free-text status, e.g. "pending", "in_progress", "done"
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Dashboard response
///
/// `tasks` is everything the caller can see (created or received);
/// `shared_with_me` is the received subset, listed separately so the
/// dashboard can render it as its own section.
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub tasks: Vec<Task>,
    pub shared_with_me: Vec<Task>,
}

/// Dashboard: tasks the caller created plus tasks shared with them
///
/// # Endpoint
///
/// ```text
/// GET /v1/tasks
/// Authorization: Bearer <token>
/// ```
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Json<DashboardResponse>> {
    let workflow = state.workflow();
    let tasks = workflow.dashboard(&caller).await?;
    let shared_with_me = workflow.shared_with_me(&caller).await?;

    Ok(Json(DashboardResponse {
        tasks,
        shared_with_me,
    }))
}

/// Create a task owned by the caller
///
/// # Endpoint
///
/// ```text
/// POST /v1/tasks
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "title": "Buy milk",
///   "description": "2%",
///   "shared_with": 2
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Empty fields, unknown recipient, or
///   an attempt to share with oneself
pub async fn create_task(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate().map_err(ApiError::from)?;

    let task = state
        .workflow()
        .create(
            &caller,
            NewTask {
                title: req.title,
                description: req.description,
                shared_with: req.shared_with,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Fetch a single task for editing
///
/// # Errors
///
/// - `404 Not Found`: No such task
/// - `403 Forbidden`: Caller is neither the creator nor an admin
pub async fn get_task(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = state.workflow().get_for_edit(&caller, id).await?;
    Ok(Json(task))
}

/// Overwrite a task's title, description, and status
///
/// # Endpoint
///
/// ```text
/// PUT /v1/tasks/:id
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "title": "Buy milk",
///   "description": "2%",
///   "status": "done"
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such task
/// - `403 Forbidden`: Caller is neither the creator nor an admin
/// - `422 Unprocessable Entity`: Empty fields
pub async fn update_task(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate().map_err(ApiError::from)?;

    let task = state
        .workflow()
        .update(
            &caller,
            id,
            TaskEdit {
                title: req.title,
                description: req.description,
                status: req.status,
            },
        )
        .await?;

    Ok(Json(task))
}

/// Permanently delete a task
///
/// # Errors
///
/// - `404 Not Found`: No such task
/// - `403 Forbidden`: Caller is neither the creator nor an admin
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.workflow().delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
