//! # Pressroom - Articles and Comments Server
//!
//! A small publishing backend built in Rust: users register and log in to
//! obtain a bearer token, then create articles and comment on them. Reads
//! are public; only the creator of an article or comment may change or
//! delete it.
//!
//! ## Overview
//!
//! Pressroom can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `pressroom-server` binary
//! 2. **As a library** - Mount [`api::routes::create_app`] in your own binary
//!
//! ### Embedding
//!
//! ```rust,ignore
//! use pressroom::{AppState, PressroomConfig, auth::jwt::AuthService};
//! use std::sync::Arc;
//!
//! let config = PressroomConfig::load("pressroom.toml")?;
//! let db = config.database_provider().create_client().await?;
//! let auth_service = Arc::new(AuthService::new(
//!     config.jwt_secret()?,
//!     config.auth.token_expiry_secs,
//! ));
//! let app = pressroom::api::routes::create_app(AppState {
//!     db,
//!     auth_service,
//! });
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `local-db` | Local SQLite database (default) |
//! | `turso` | Remote Turso database |
//! | `swagger-ui` | Interactive API docs at `/swagger-ui/` |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Tokens, bearer middleware and the ownership guard
//! - [`cli`] - `init` and `config` subcommands
//! - [`db`] - Storage abstraction (SQLite, Turso)
//! - [`types`] - Request/response types and error handling
//! - [`utils`] - TOML configuration

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Token issuing, bearer middleware and ownership checks.
pub mod auth;
/// Command-line interface.
pub mod cli;
/// Database clients (Turso/SQLite).
pub mod db;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities (TOML).
pub mod utils;

// Re-export commonly used types
pub use db::{DatabaseClient, DatabaseProvider, TursoClient};
pub use types::{AppError, Result};
pub use utils::toml_config::PressroomConfig;

use crate::auth::jwt::AuthService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Storage backend
    pub db: Arc<dyn DatabaseClient>,
    /// Password hashing and token issuing
    pub auth_service: Arc<AuthService>,
}
