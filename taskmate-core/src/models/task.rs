/// Task model and database operations
///
/// A task belongs to exactly one creator (`created_by`) and may be shared
/// with at most one other user (`shared_with`). Status is free text: it
/// defaults to `"pending"` and conventionally moves through
/// `pending → in-progress → done`, but the workflow accepts any non-empty
/// string a caller submits.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id          INTEGER PRIMARY KEY AUTOINCREMENT,
///     title       TEXT NOT NULL,
///     description TEXT NOT NULL,
///     status      TEXT NOT NULL DEFAULT 'pending',
///     created_by  INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     shared_with INTEGER REFERENCES users(id) ON DELETE SET NULL,
///     created_at  TEXT NOT NULL,
///     updated_at  TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Conventional status values
///
/// Not enforced by the store; exported so callers share one spelling.
pub mod status {
    pub const PENDING: &str = "pending";
    pub const IN_PROGRESS: &str = "in-progress";
    pub const DONE: &str = "done";
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, assigned at creation
    pub id: i64,

    /// Task title
    pub title: String,

    /// Long-form description
    pub description: String,

    /// Free-text status, defaults to "pending"
    pub status: String,

    /// ID of the user who created the task; immutable after creation
    pub created_by: i64,

    /// ID of the single user this task is shared with, if any
    pub shared_with: Option<i64>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Description
    pub description: String,

    /// Creator's user ID
    pub created_by: i64,

    /// Optional recipient to share the task with
    pub shared_with: Option<i64>,
}

impl Task {
    /// Creates a new task with status "pending"
    pub async fn create(pool: &SqlitePool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, created_by, shared_with, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, status, created_by, shared_with, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(status::PENDING)
        .bind(data.created_by)
        .bind(data.shared_with)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, created_by, shared_with, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks the user created or received ("my tasks")
    ///
    /// The dashboard query: every task where the user is creator or the
    /// shared recipient, newest first.
    pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, created_by, shared_with, created_at, updated_at
            FROM tasks
            WHERE created_by = $1 OR shared_with = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks shared with the user (recipient-only)
    pub async fn list_shared_with(
        pool: &SqlitePool,
        user_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, created_by, shared_with, created_at, updated_at
            FROM tasks
            WHERE shared_with = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists every task in the store, regardless of creator or recipient
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, created_by, shared_with, created_at, updated_at
            FROM tasks
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Overwrites title, description, and status
    ///
    /// `created_by` and `shared_with` are immutable through this
    /// operation. Returns the updated task, or `None` if no task with the
    /// given id exists. Last writer wins; there is no conflict detection.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        title: &str,
        description: &str,
        status: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                status = $4,
                updated_at = $5
            WHERE id = $1
            RETURNING id, title, description, status, created_by, shared_with, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Permanently deletes a task
    ///
    /// Returns true if a row was removed. There is no soft delete.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_constants() {
        assert_eq!(status::PENDING, "pending");
        assert_eq!(status::IN_PROGRESS, "in-progress");
        assert_eq!(status::DONE, "done");
    }
}
