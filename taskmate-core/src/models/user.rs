/// User model and database operations
///
/// Users own tasks as creators and may receive tasks as the shared
/// recipient; both relationships are derived by query, not stored here.
/// Passwords are stored as Argon2id hashes, never in plaintext.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id            INTEGER PRIMARY KEY AUTOINCREMENT,
///     username      TEXT NOT NULL UNIQUE,
///     email         TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     role          TEXT NOT NULL DEFAULT 'member',
///     created_at    TEXT NOT NULL,
///     updated_at    TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::Error;

/// Authorization level attached to a user
///
/// A closed set: unknown role strings are rejected at registration time
/// instead of being stored verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular user: sees own and shared tasks, edits own tasks
    Member,

    /// Can view, edit, and delete every task in the system
    Admin,
}

impl Role {
    /// Converts role to string for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Member
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Role::Member),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// User model representing an account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned at creation
    pub id: i64,

    /// Globally unique username
    pub username: String,

    /// Globally unique email address
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Authorization level
    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Username (must be unique)
    pub username: String,

    /// Email address (must be unique)
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    /// Role for the new account
    pub role: Role,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// A unique-constraint violation on the username or email column maps
    /// to `DuplicateUsername` / `DuplicateEmail`, so concurrent
    /// registrations that slip past the existence pre-check in
    /// `identity::Identity` still surface as typed duplicates.
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> Result<Self, Error> {
        let now = Utc::now();

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                // SQLite reports "UNIQUE constraint failed: users.<column>"
                if db.message().contains("users.username") {
                    Err(Error::DuplicateUsername(data.username))
                } else {
                    Err(Error::DuplicateEmail(data.email))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    pub async fn find_by_email(
        pool: &SqlitePool,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists every user except the given one, ordered by username
    ///
    /// This backs the share-candidate list shown when creating a task:
    /// a task can be shared with any user other than its creator.
    pub async fn list_others(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE id != $1
            ORDER BY username ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Counts total number of users
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Member.as_str(), "member");
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!(Role::from_str("member").unwrap(), Role::Member);
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert!(Role::from_str("superuser").is_err());
        assert!(Role::from_str("Admin").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_role_default_is_member() {
        assert_eq!(Role::default(), Role::Member);
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"member\"").unwrap();
        assert_eq!(role, Role::Member);
    }
}
