use super::traits::{DatabaseClient, User};
use crate::auth::ownership::ResourceKind;
use crate::types::{AppError, ArticleInput, ArticleView, CommentView, Result};
use async_trait::async_trait;
use chrono::Utc;
use libsql::{params, params::IntoParams, Builder, Connection, Database, Row};
use std::path::Path;

/// libsql-backed storage for users, articles and comments.
///
/// A single connection is opened at construction and shared by every
/// request; libsql connections are safe to use concurrently, and an
/// in-memory database only lives as long as the connection that created it.
pub struct TursoClient {
    _db: Database,
    conn: Connection,
}

fn db_error(context: &'static str) -> impl Fn(libsql::Error) -> AppError {
    move |e| AppError::Database(format!("{}: {}", context, e))
}

fn is_unique_violation(err: &libsql::Error) -> bool {
    err.to_string().contains("UNIQUE constraint failed")
}

fn is_foreign_key_violation(err: &libsql::Error) -> bool {
    err.to_string().contains("FOREIGN KEY constraint failed")
}

fn rfc3339(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

fn row_error(e: libsql::Error) -> AppError {
    AppError::Database(e.to_string())
}

const ARTICLE_SELECT: &str = "SELECT articles.id, articles.title, articles.body, articles.category,
        articles.user_id, users.email, articles.created_at
     FROM articles
     JOIN users ON articles.user_id = users.id";

const COMMENT_SELECT: &str = "SELECT comments.id, comments.article_id, comments.body,
        comments.user_id, users.email, comments.created_at
     FROM comments
     JOIN users ON comments.user_id = users.id";

fn article_from_row(row: &Row) -> Result<ArticleView> {
    Ok(ArticleView {
        id: row.get(0).map_err(row_error)?,
        title: row.get(1).map_err(row_error)?,
        body: row.get(2).map_err(row_error)?,
        category: row.get(3).map_err(row_error)?,
        author_id: row.get(4).map_err(row_error)?,
        author: row.get(5).map_err(row_error)?,
        created_at: rfc3339(row.get(6).map_err(row_error)?),
    })
}

fn comment_from_row(row: &Row) -> Result<CommentView> {
    Ok(CommentView {
        id: row.get(0).map_err(row_error)?,
        article_id: row.get(1).map_err(row_error)?,
        body: row.get(2).map_err(row_error)?,
        author_id: row.get(3).map_err(row_error)?,
        author: row.get(4).map_err(row_error)?,
        created_at: rfc3339(row.get(5).map_err(row_error)?),
    })
}

impl TursoClient {
    /// Open an ephemeral in-memory database. Used by tests and `url = ":memory:"`.
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:")
            .build()
            .await
            .map_err(db_error("Failed to open in-memory database"))?;

        Self::from_database(db).await
    }

    /// Open (or create) a SQLite database file at `path`.
    pub async fn new_local(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Database(format!("Failed to create database directory: {}", e))
            })?;
        }

        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(db_error("Failed to open local database"))?;

        Self::from_database(db).await
    }

    /// Connect to a remote Turso database.
    #[cfg(feature = "turso")]
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(db_error("Failed to connect to Turso"))?;

        Self::from_database(db).await
    }

    async fn from_database(db: Database) -> Result<Self> {
        let conn = db
            .connect()
            .map_err(db_error("Failed to get connection"))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        Ok(client)
    }

    pub fn connection(&self) -> Connection {
        self.conn.clone()
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection();

        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(db_error("Failed to enable foreign keys"))?;

        // Users table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(db_error("Failed to create users table"))?;

        // Articles table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                category TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id)
            )",
            (),
        )
        .await
        .map_err(db_error("Failed to create articles table"))?;

        // Comments table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                article_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                body TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                FOREIGN KEY (article_id) REFERENCES articles(id) ON DELETE CASCADE,
                FOREIGN KEY (user_id) REFERENCES users(id)
            )",
            (),
        )
        .await
        .map_err(db_error("Failed to create comments table"))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_comments_article ON comments(article_id)",
            (),
        )
        .await
        .map_err(db_error("Failed to create comments index"))?;

        Ok(())
    }

    /// Runs an `INSERT ... RETURNING id` statement.
    async fn insert_returning_id(
        &self,
        sql: &str,
        params: impl IntoParams,
    ) -> std::result::Result<Option<i64>, libsql::Error> {
        let mut rows = self.conn.query(sql, params).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<i64>(0)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl DatabaseClient for TursoClient {
    // User operations
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<i64> {
        let now = Utc::now().timestamp();

        self.insert_returning_id(
            "INSERT INTO users (email, password_hash, created_at)
             VALUES (?, ?, ?) RETURNING id",
            params![email, password_hash, now],
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Email is already registered".to_string())
            } else {
                AppError::Database(format!("Failed to create user: {}", e))
            }
        })?
        .ok_or_else(|| AppError::Database("User insert returned no id".to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, email, password_hash FROM users WHERE email = ?",
                params![email],
            )
            .await
            .map_err(db_error("Failed to query user"))?;

        match rows.next().await.map_err(db_error("Failed to read user"))? {
            Some(row) => Ok(Some(User {
                id: row.get(0).map_err(row_error)?,
                email: row.get(1).map_err(row_error)?,
                password_hash: row.get(2).map_err(row_error)?,
            })),
            None => Ok(None),
        }
    }

    // Article operations
    async fn create_article(&self, owner_id: i64, article: &ArticleInput) -> Result<i64> {
        let now = Utc::now().timestamp();

        self.insert_returning_id(
            "INSERT INTO articles (title, body, category, user_id, created_at)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
            params![
                article.title.as_str(),
                article.body.as_str(),
                article.category.as_str(),
                owner_id,
                now
            ],
        )
        .await
        .map_err(db_error("Failed to create article"))?
        .ok_or_else(|| AppError::Database("Article insert returned no id".to_string()))
    }

    async fn list_articles(&self) -> Result<Vec<ArticleView>> {
        let sql = format!(
            "{} ORDER BY articles.created_at DESC, articles.id DESC",
            ARTICLE_SELECT
        );
        let mut rows = self
            .conn
            .query(&sql, ())
            .await
            .map_err(db_error("Failed to query articles"))?;

        let mut articles = Vec::new();
        while let Some(row) = rows.next().await.map_err(db_error("Failed to read article"))? {
            articles.push(article_from_row(&row)?);
        }

        Ok(articles)
    }

    async fn get_article(&self, id: i64) -> Result<Option<ArticleView>> {
        let sql = format!("{} WHERE articles.id = ?", ARTICLE_SELECT);
        let mut rows = self
            .conn
            .query(&sql, params![id])
            .await
            .map_err(db_error("Failed to query article"))?;

        match rows.next().await.map_err(db_error("Failed to read article"))? {
            Some(row) => Ok(Some(article_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn article_exists(&self, id: i64) -> Result<bool> {
        let mut rows = self
            .conn
            .query("SELECT id FROM articles WHERE id = ?", params![id])
            .await
            .map_err(db_error("Failed to query article"))?;

        Ok(rows
            .next()
            .await
            .map_err(db_error("Failed to read article"))?
            .is_some())
    }

    async fn update_article(&self, id: i64, article: &ArticleInput) -> Result<bool> {
        let changed = self
            .conn
            .execute(
                "UPDATE articles SET title = ?, body = ?, category = ? WHERE id = ?",
                params![
                    article.title.as_str(),
                    article.body.as_str(),
                    article.category.as_str(),
                    id
                ],
            )
            .await
            .map_err(db_error("Failed to update article"))?;

        Ok(changed > 0)
    }

    async fn delete_article(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM articles WHERE id = ?", params![id])
            .await
            .map_err(db_error("Failed to delete article"))?;

        Ok(changed > 0)
    }

    // Comment operations
    async fn create_comment(&self, article_id: i64, owner_id: i64, body: &str) -> Result<i64> {
        let now = Utc::now().timestamp();

        self.insert_returning_id(
            "INSERT INTO comments (article_id, user_id, body, created_at)
             VALUES (?, ?, ?, ?) RETURNING id",
            params![article_id, owner_id, body, now],
        )
        .await
        .map_err(|e| {
            // The article was deleted after the handler checked for it
            if is_foreign_key_violation(&e) {
                AppError::NotFound("Article not found".to_string())
            } else {
                AppError::Database(format!("Failed to create comment: {}", e))
            }
        })?
        .ok_or_else(|| AppError::Database("Comment insert returned no id".to_string()))
    }

    async fn list_comments(&self, article_id: i64) -> Result<Vec<CommentView>> {
        let sql = format!(
            "{} WHERE comments.article_id = ? ORDER BY comments.created_at ASC, comments.id ASC",
            COMMENT_SELECT
        );
        let mut rows = self
            .conn
            .query(&sql, params![article_id])
            .await
            .map_err(db_error("Failed to query comments"))?;

        let mut comments = Vec::new();
        while let Some(row) = rows.next().await.map_err(db_error("Failed to read comment"))? {
            comments.push(comment_from_row(&row)?);
        }

        Ok(comments)
    }

    async fn update_comment(&self, id: i64, body: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute(
                "UPDATE comments SET body = ? WHERE id = ?",
                params![body, id],
            )
            .await
            .map_err(db_error("Failed to update comment"))?;

        Ok(changed > 0)
    }

    async fn delete_comment(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM comments WHERE id = ?", params![id])
            .await
            .map_err(db_error("Failed to delete comment"))?;

        Ok(changed > 0)
    }

    async fn find_resource_owner(&self, kind: ResourceKind, id: i64) -> Result<Option<i64>> {
        let sql = match kind {
            ResourceKind::Article => "SELECT user_id FROM articles WHERE id = ?",
            ResourceKind::Comment => "SELECT user_id FROM comments WHERE id = ?",
        };

        let mut rows = self
            .conn
            .query(sql, params![id])
            .await
            .map_err(db_error("Failed to query resource owner"))?;

        match rows
            .next()
            .await
            .map_err(db_error("Failed to read resource owner"))?
        {
            Some(row) => Ok(Some(row.get(0).map_err(row_error)?)),
            None => Ok(None),
        }
    }
}
