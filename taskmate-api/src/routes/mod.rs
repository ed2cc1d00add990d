/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `tasks`: Dashboard and task CRUD
/// - `users`: Share-candidate listing
/// - `admin`: Admin-only all-tasks view

pub mod admin;
pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;
