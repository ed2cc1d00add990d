/// Database models for Taskmate
///
/// This module contains the row types and their queries.
///
/// # Models
///
/// - `user`: User accounts with a member/admin role
/// - `task`: Tasks with one creator and at most one shared recipient
///
/// # Example
///
/// ```no_run
/// use taskmate_core::models::user::{CreateUser, Role, User};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), taskmate_core::Error> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "alice".to_string(),
///         email: "alice@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         role: Role::Member,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
