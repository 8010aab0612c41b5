//! Comment handlers.

use super::{parse_id, required};
use crate::{
    auth::middleware::AuthUser,
    auth::ownership::{require_owner, ResourceKind},
    types::{AppError, CommentRequest, CommentView, CreatedResponse, MessageResponse, Result},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

/// List the comments on an article, oldest first.
///
/// An unknown article simply has no comments.
#[utoipa::path(
    get,
    path = "/api/articles/{id}/comments",
    params(
        ("id" = i64, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Comments on the article", body = Vec<CommentView>),
        (status = 400, description = "Non-integer id")
    ),
    tag = "comments"
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<Json<Vec<CommentView>>> {
    let article_id = parse_id(&article_id, "article")?;
    let comments = state.db.list_comments(article_id).await?;
    Ok(Json(comments))
}

/// Comment on an article.
#[utoipa::path(
    post,
    path = "/api/articles/{id}/comments",
    params(
        ("id" = i64, Path, description = "Article ID")
    ),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CreatedResponse),
        (status = 400, description = "Invalid id or empty comment"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Article not found")
    ),
    tag = "comments",
    security(("bearer" = []))
)]
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(article_id): Path<String>,
    payload: std::result::Result<Json<CommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let article_id = parse_id(&article_id, "article")?;
    let Json(payload) = payload?;
    let body = required(payload.body, "body")?;

    // Referential check only; anyone may comment on any article.
    if !state.db.article_exists(article_id).await? {
        return Err(AppError::NotFound("Article not found".to_string()));
    }

    let id = state
        .db
        .create_comment(article_id, claims.user_id(), &body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Comment created".to_string(),
            id,
        }),
    ))
}

/// Edit your own comment.
#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    params(
        ("id" = i64, Path, description = "Comment ID")
    ),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = MessageResponse),
        (status = 400, description = "Invalid id or empty comment"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the comment's creator"),
        (status = 404, description = "Comment not found")
    ),
    tag = "comments",
    security(("bearer" = []))
)]
pub async fn update_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    payload: std::result::Result<Json<CommentRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id, "comment")?;
    let Json(payload) = payload?;
    let body = required(payload.body, "body")?;

    require_owner(state.db.as_ref(), ResourceKind::Comment, id, &claims).await?;

    if !state.db.update_comment(id, &body).await? {
        return Err(AppError::NotFound("Comment not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Comment updated")))
}

/// Delete your own comment.
#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(
        ("id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 400, description = "Non-integer id"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the comment's creator"),
        (status = 404, description = "Comment not found")
    ),
    tag = "comments",
    security(("bearer" = []))
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id, "comment")?;

    require_owner(state.db.as_ref(), ResourceKind::Comment, id, &claims).await?;

    if !state.db.delete_comment(id).await? {
        return Err(AppError::NotFound("Comment not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Comment deleted")))
}
