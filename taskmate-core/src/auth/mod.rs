/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: Signed session tokens carrying caller id + role
/// - [`authorization`]: The `Caller` identity and the access predicates
///   used by every task operation
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with a random per-password salt
/// - **Session Tokens**: HS256 signing with 24-hour expiration
/// - **Constant-time Comparison**: Verification never compares plaintext
///
/// # Example
///
/// ```no_run
/// use taskmate_core::auth::password::{hash_password, verify_password};
/// use taskmate_core::auth::session::{create_token, validate_token, Claims};
/// use taskmate_core::models::user::Role;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(1, Role::Member);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod password;
pub mod session;
