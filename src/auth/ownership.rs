//! Per-resource ownership checks for article and comment mutations.
//!
//! Ownership is binary: the user who created a row is the only one who may
//! update or delete it. There are no roles, delegation or admin overrides.

use crate::db::DatabaseClient;
use crate::types::{AppError, Claims, Result};

/// Kinds of rows that carry an owning user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Article,
    Comment,
}

impl ResourceKind {
    /// Human readable name used in error messages and logs.
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Article => "article",
            ResourceKind::Comment => "comment",
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            ResourceKind::Article => "Article not found",
            ResourceKind::Comment => "Comment not found",
        }
    }

    fn forbidden_message(self) -> &'static str {
        match self {
            ResourceKind::Article => "You can only modify your own articles",
            ResourceKind::Comment => "You can only modify your own comments",
        }
    }
}

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Forbidden,
    NotFound,
}

/// Decides access from the resource's owner (if the row exists) and the caller.
///
/// Existence is checked before ownership.
pub fn authorize(resource_owner_id: Option<i64>, caller_id: i64) -> Access {
    match resource_owner_id {
        None => Access::NotFound,
        Some(owner) if owner == caller_id => Access::Allowed,
        Some(_) => Access::Forbidden,
    }
}

impl Access {
    pub fn into_result(self, kind: ResourceKind) -> Result<()> {
        match self {
            Access::Allowed => Ok(()),
            Access::Forbidden => Err(AppError::Forbidden(kind.forbidden_message().to_string())),
            Access::NotFound => Err(AppError::NotFound(kind.not_found_message().to_string())),
        }
    }
}

/// Loads the owner of `kind`/`resource_id` and fails unless it is the caller.
pub async fn require_owner(
    db: &dyn DatabaseClient,
    kind: ResourceKind,
    resource_id: i64,
    caller: &Claims,
) -> Result<()> {
    let owner = db.find_resource_owner(kind, resource_id).await?;
    let access = authorize(owner, caller.user_id());

    if access == Access::Forbidden {
        tracing::warn!(
            user_id = caller.user_id(),
            resource = kind.label(),
            resource_id,
            "ownership check denied mutation"
        );
    }

    access.into_result(kind)
}
