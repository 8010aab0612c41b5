//! Database abstraction traits
//!
//! This module provides the `DatabaseClient` trait that abstracts over different
//! database backends (in-memory SQLite, file-based SQLite, remote Turso).
//!
//! # Example
//!
//! ```rust,ignore
//! use pressroom::db::DatabaseProvider;
//!
//! // Use in-memory database (default for development/testing)
//! let db = DatabaseProvider::Memory.create_client().await?;
//!
//! // Use file-based SQLite
//! let db = DatabaseProvider::SQLite { path: "data.db".into() }.create_client().await?;
//! ```

use crate::auth::ownership::ResourceKind;
use crate::types::{ArticleInput, ArticleView, CommentView, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Database provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires network access)
    #[cfg(feature = "turso")]
    Turso {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Create a database client from this provider configuration
    pub async fn create_client(&self) -> Result<Arc<dyn DatabaseClient>> {
        match self {
            DatabaseProvider::Memory => {
                let client = super::turso::TursoClient::new_memory().await?;
                Ok(Arc::new(client))
            }
            DatabaseProvider::SQLite { path } => {
                let client = super::turso::TursoClient::new_local(path).await?;
                Ok(Arc::new(client))
            }
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, auth_token } => {
                let client =
                    super::turso::TursoClient::new_remote(url.clone(), auth_token.clone()).await?;
                Ok(Arc::new(client))
            }
        }
    }
}

/// User record from the database
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// Abstract trait for database operations
///
/// Storage knows nothing about who is calling; handlers consult the
/// ownership guard before invoking any mutation here.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    // ============== User Operations ==============

    /// Create a new user and return its id.
    ///
    /// Fails with `AppError::Conflict` when the email is already registered.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<i64>;

    /// Get a user by email
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    // ============== Article Operations ==============

    /// Insert an article owned by `owner_id` and return its id.
    async fn create_article(&self, owner_id: i64, article: &ArticleInput) -> Result<i64>;

    /// All articles, newest first.
    async fn list_articles(&self) -> Result<Vec<ArticleView>>;

    async fn get_article(&self, id: i64) -> Result<Option<ArticleView>>;

    async fn article_exists(&self, id: i64) -> Result<bool>;

    /// Returns `false` when no row matched.
    async fn update_article(&self, id: i64, article: &ArticleInput) -> Result<bool>;

    /// Deletes the article and its comments. Returns `false` when no row matched.
    async fn delete_article(&self, id: i64) -> Result<bool>;

    // ============== Comment Operations ==============

    async fn create_comment(&self, article_id: i64, owner_id: i64, body: &str) -> Result<i64>;

    /// Comments on an article, oldest first. Empty for unknown articles.
    async fn list_comments(&self, article_id: i64) -> Result<Vec<CommentView>>;

    async fn update_comment(&self, id: i64, body: &str) -> Result<bool>;

    async fn delete_comment(&self, id: i64) -> Result<bool>;

    // ============== Ownership ==============

    /// Owning user id of the given row, or `None` if the row does not exist.
    async fn find_resource_owner(&self, kind: ResourceKind, id: i64) -> Result<Option<i64>>;
}
