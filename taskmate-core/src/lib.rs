//! # Taskmate Core Library
//!
//! This crate contains the data model and business logic for Taskmate:
//! user accounts, credential handling, and the shared-task workflow.
//! The HTTP surface lives in `taskmate-api` and consumes the two service
//! types exported here.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their queries
//! - `auth`: Password hashing, session tokens, authorization predicates
//! - `db`: Connection pool and migrations
//! - `identity`: Identity & Access service (register, authenticate)
//! - `workflow`: Task Workflow service (create, share, update, delete, list)
//! - `error`: The workflow error type

pub mod auth;
pub mod db;
pub mod error;
pub mod identity;
pub mod models;
pub mod workflow;

pub use error::{Error, Result};

/// Current version of the taskmate core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
