/// Identity & Access service
///
/// Owns user registration, credential verification, and the user lookups
/// the task workflow needs. The service holds an explicit handle to the
/// store and is otherwise stateless; there is no ambient registry.
///
/// # Example
///
/// ```no_run
/// use taskmate_core::identity::{Identity, NewAccount};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> taskmate_core::Result<()> {
/// let identity = Identity::new(pool);
///
/// let user = identity
///     .register(NewAccount {
///         username: "alice".to_string(),
///         email: "alice@example.com".to_string(),
///         password: "pw1".to_string(),
///         role: None,
///     })
///     .await?;
///
/// let authenticated = identity.authenticate("alice", "pw1").await?;
/// assert_eq!(authenticated.id, user.id);
/// # Ok(())
/// # }
/// ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::auth::authorization::Caller;
use crate::auth::password;
use crate::error::{Error, Result};
use crate::models::user::{CreateUser, Role, User};

/// Registration input
///
/// `role` is optional and defaults to member. Role strings outside
/// `{member, admin}` are rejected rather than stored.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

/// Identity & Access service
#[derive(Debug, Clone)]
pub struct Identity {
    db: SqlitePool,
}

impl Identity {
    /// Creates the service with an explicit store handle
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Registers a new user
    ///
    /// Hashes the password with Argon2id and persists one new user row.
    ///
    /// # Errors
    ///
    /// - `Validation` if username, email, or password is blank, or the
    ///   role string is not `member` or `admin`
    /// - `DuplicateUsername` / `DuplicateEmail` on uniqueness collisions;
    ///   the store is left unchanged
    pub async fn register(&self, account: NewAccount) -> Result<User> {
        let username = account.username.trim();
        let email = account.email.trim();

        if username.is_empty() {
            return Err(Error::validation("username is required"));
        }
        if email.is_empty() {
            return Err(Error::validation("email is required"));
        }
        if account.password.is_empty() {
            return Err(Error::validation("password is required"));
        }

        let role = match account.role.as_deref() {
            None | Some("") => Role::default(),
            Some(raw) => raw.parse::<Role>().map_err(Error::Validation)?,
        };

        if User::find_by_username(&self.db, username).await?.is_some() {
            return Err(Error::DuplicateUsername(username.to_string()));
        }
        if User::find_by_email(&self.db, email).await?.is_some() {
            return Err(Error::DuplicateEmail(email.to_string()));
        }

        let password_hash = password::hash_password(&account.password)?;

        let user = User::create(
            &self.db,
            CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            },
        )
        .await?;

        info!(user_id = user.id, username = %user.username, role = user.role.as_str(), "User registered");
        Ok(user)
    }

    /// Verifies credentials and returns the authenticated user
    ///
    /// The password check only runs when a user row was actually found;
    /// an unknown username short-circuits to `InvalidCredentials` without
    /// touching the hasher. The caller mints a session token from the
    /// returned user (see `auth::session`).
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown username or a wrong password;
    /// the two cases are indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password_input: &str) -> Result<User> {
        let Some(user) = User::find_by_username(&self.db, username).await? else {
            debug!(username, "Login attempt for unknown username");
            return Err(Error::InvalidCredentials);
        };

        if !password::verify_password(password_input, &user.password_hash)? {
            debug!(user_id = user.id, "Login attempt with wrong password");
            return Err(Error::InvalidCredentials);
        }

        info!(user_id = user.id, "User authenticated");
        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_user(&self, id: i64) -> Result<Option<User>> {
        Ok(User::find_by_id(&self.db, id).await?)
    }

    /// Lists every user other than the caller
    ///
    /// The share-candidate list offered when creating a task.
    pub async fn list_peers(&self, caller: &Caller) -> Result<Vec<User>> {
        Ok(User::list_others(&self.db, caller.id).await?)
    }
}
