/// Task Workflow service
///
/// Owns the task lifecycle: creation with optional single-recipient
/// sharing, the two dashboard queries, the admin-only all-tasks view,
/// status mutation, and deletion. Authorization runs here, before any
/// state changes, using the authenticated `Caller` passed in by the
/// presentation layer.
///
/// Each operation is a self-contained unit of work: single-row
/// statements, last-writer-wins, no locking or conflict detection.
///
/// # Example
///
/// ```no_run
/// use taskmate_core::auth::authorization::Caller;
/// use taskmate_core::models::user::Role;
/// use taskmate_core::workflow::{NewTask, TaskEdit, TaskWorkflow};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> taskmate_core::Result<()> {
/// let workflow = TaskWorkflow::new(pool);
/// let caller = Caller { id: 1, role: Role::Member };
///
/// let task = workflow
///     .create(&caller, NewTask {
///         title: "Buy milk".to_string(),
///         description: "2%".to_string(),
///         shared_with: Some(2),
///     })
///     .await?;
///
/// let mine = workflow.dashboard(&caller).await?;
/// assert!(mine.iter().any(|t| t.id == task.id));
/// # Ok(())
/// # }
/// ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::auth::authorization::{require_admin, require_creator_or_admin, Caller};
use crate::error::{Error, Result};
use crate::models::task::{CreateTask, Task};
use crate::models::user::User;

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,

    /// Optional recipient; must be an existing user other than the caller
    pub shared_with: Option<i64>,
}

/// Input for editing a task
///
/// Overwrites title, description, and status. The creator and the shared
/// recipient cannot be changed once the task exists.
#[derive(Debug, Clone)]
pub struct TaskEdit {
    pub title: String,
    pub description: String,
    pub status: String,
}

/// Task Workflow service
#[derive(Debug, Clone)]
pub struct TaskWorkflow {
    db: SqlitePool,
}

impl TaskWorkflow {
    /// Creates the service with an explicit store handle
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Creates a task owned by the caller, with status "pending"
    ///
    /// When `shared_with` is present it must reference an existing user
    /// other than the caller. The creation UI only offers other users,
    /// but the check runs here regardless rather than trusting the client.
    ///
    /// # Errors
    ///
    /// `Validation` on an empty title or description, a missing recipient
    /// user, or an attempt to share with oneself.
    pub async fn create(&self, caller: &Caller, task: NewTask) -> Result<Task> {
        validate_text(&task.title, "title")?;
        validate_text(&task.description, "description")?;

        if let Some(recipient_id) = task.shared_with {
            if recipient_id == caller.id {
                return Err(Error::validation("a task cannot be shared with its creator"));
            }
            if User::find_by_id(&self.db, recipient_id).await?.is_none() {
                return Err(Error::validation(format!(
                    "cannot share with user {}: no such user",
                    recipient_id
                )));
            }
        }

        let created = Task::create(
            &self.db,
            CreateTask {
                title: task.title,
                description: task.description,
                created_by: caller.id,
                shared_with: task.shared_with,
            },
        )
        .await?;

        info!(
            task_id = created.id,
            created_by = caller.id,
            shared_with = ?created.shared_with,
            "Task created"
        );
        Ok(created)
    }

    /// Lists the caller's dashboard: tasks they created or received
    pub async fn dashboard(&self, caller: &Caller) -> Result<Vec<Task>> {
        Ok(Task::list_for_user(&self.db, caller.id).await?)
    }

    /// Lists only the tasks shared with the caller
    ///
    /// The dashboard shows both shapes: everything the caller can see,
    /// and the recipient-only subset.
    pub async fn shared_with_me(&self, caller: &Caller) -> Result<Vec<Task>> {
        Ok(Task::list_shared_with(&self.db, caller.id).await?)
    }

    /// Lists every task in the store; admin only
    ///
    /// # Errors
    ///
    /// `AccessDenied` unless the caller holds the admin role, regardless
    /// of what tasks exist.
    pub async fn list_all(&self, caller: &Caller) -> Result<Vec<Task>> {
        require_admin(caller)?;
        Ok(Task::list_all(&self.db).await?)
    }

    /// Overwrites a task's title, description, and status
    ///
    /// Status is free text; only emptiness is rejected. `created_by` and
    /// `shared_with` are immutable through this operation.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no task with `task_id` exists
    /// - `AccessDenied` unless the caller is the creator or an admin
    /// - `Validation` on empty fields
    pub async fn update(&self, caller: &Caller, task_id: i64, edit: TaskEdit) -> Result<Task> {
        let task = Task::find_by_id(&self.db, task_id)
            .await?
            .ok_or(Error::NotFound(task_id))?;

        require_creator_or_admin(caller, &task)?;

        validate_text(&edit.title, "title")?;
        validate_text(&edit.description, "description")?;
        validate_text(&edit.status, "status")?;

        let updated = Task::update(&self.db, task_id, &edit.title, &edit.description, &edit.status)
            .await?
            .ok_or(Error::NotFound(task_id))?;

        info!(task_id, caller_id = caller.id, status = %updated.status, "Task updated");
        Ok(updated)
    }

    /// Permanently deletes a task
    ///
    /// # Errors
    ///
    /// Same existence and authorization checks as `update`.
    pub async fn delete(&self, caller: &Caller, task_id: i64) -> Result<()> {
        let task = Task::find_by_id(&self.db, task_id)
            .await?
            .ok_or(Error::NotFound(task_id))?;

        require_creator_or_admin(caller, &task)?;

        if !Task::delete(&self.db, task_id).await? {
            debug!(task_id, "Task vanished between lookup and delete");
            return Err(Error::NotFound(task_id));
        }

        info!(task_id, caller_id = caller.id, "Task deleted");
        Ok(())
    }

    /// Fetches a single task the caller is allowed to edit
    ///
    /// Backs the edit form: same existence and authorization rules as
    /// `update`, without mutating anything.
    pub async fn get_for_edit(&self, caller: &Caller, task_id: i64) -> Result<Task> {
        let task = Task::find_by_id(&self.db, task_id)
            .await?
            .ok_or(Error::NotFound(task_id))?;

        require_creator_or_admin(caller, &task)?;
        Ok(task)
    }
}

fn validate_text(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{} is required", field)));
    }
    Ok(())
}
