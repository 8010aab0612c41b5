//! Relational storage for users, articles and comments.
//!
//! This module provides:
//! - **`DatabaseClient`**: the async storage contract the handlers depend on
//! - **`TursoClient`**: its libsql implementation (in-memory, local SQLite file
//!   or remote Turso with the `turso` feature)
//!
//! Storage performs no authorization of its own; see [`crate::auth::ownership`].

pub mod traits;
pub mod turso;

// Re-exports
pub use traits::{DatabaseClient, DatabaseProvider, User};
pub use turso::TursoClient;
