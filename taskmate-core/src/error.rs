/// Workflow error type
///
/// Every operation in the identity and task workflow services returns
/// `Result<T, Error>`. The variants cover the expected, recoverable
/// failure modes of the domain; `Database` is the only unexpected one
/// and is treated as fatal for the request by the API layer.

use crate::auth::{password::PasswordError, session::SessionError};

/// Result alias used throughout the core crate
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error for identity and task workflow operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A user with this username already exists
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    /// A user with this email already exists
    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),

    /// Unknown username or wrong password
    ///
    /// Deliberately a single variant: login must not reveal which of the
    /// two was wrong.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Caller is not allowed to perform the operation
    #[error("access denied: {0}")]
    AccessDenied(&'static str),

    /// No task with the given id exists
    #[error("task {0} not found")]
    NotFound(i64),

    /// A required field was missing or malformed
    #[error("{0}")]
    Validation(String),

    /// Password hashing or verification failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Session token creation or validation failed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Underlying store failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Error {
    /// Builds a `Validation` error from any displayable message
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
