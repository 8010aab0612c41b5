//! Article handlers.
//!
//! Reads are public. Creating requires a bearer token; updating and deleting
//! additionally require the caller to be the article's creator.

use super::{parse_id, required};
use crate::{
    auth::middleware::AuthUser,
    auth::ownership::{require_owner, ResourceKind},
    types::{
        AppError, ArticleInput, ArticleRequest, ArticleView, CreatedResponse, MessageResponse,
        Result,
    },
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

fn article_input(payload: ArticleRequest) -> Result<ArticleInput> {
    Ok(ArticleInput {
        title: required(payload.title, "title")?,
        body: required(payload.body, "body")?,
        category: required(payload.category, "category")?,
    })
}

/// List all articles, newest first.
#[utoipa::path(
    get,
    path = "/api/articles",
    responses(
        (status = 200, description = "All articles", body = Vec<ArticleView>)
    ),
    tag = "articles"
)]
pub async fn list_articles(State(state): State<AppState>) -> Result<Json<Vec<ArticleView>>> {
    let articles = state.db.list_articles().await?;
    Ok(Json(articles))
}

/// Get a single article.
#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(
        ("id" = i64, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Article", body = ArticleView),
        (status = 400, description = "Non-integer id"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArticleView>> {
    let id = parse_id(&id, "article")?;

    state
        .db
        .get_article(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Article not found".to_string()))
}

/// Create an article owned by the caller.
#[utoipa::path(
    post,
    path = "/api/articles",
    request_body = ArticleRequest,
    responses(
        (status = 201, description = "Article created", body = CreatedResponse),
        (status = 400, description = "Missing title, body or category"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "articles",
    security(("bearer" = []))
)]
pub async fn create_article(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    payload: std::result::Result<Json<ArticleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let Json(payload) = payload?;
    let article = article_input(payload)?;

    // Owner always comes from the token, never from the body.
    let id = state.db.create_article(claims.user_id(), &article).await?;

    tracing::info!(article_id = id, user_id = claims.user_id(), "article created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Article created".to_string(),
            id,
        }),
    ))
}

/// Edit your own article.
#[utoipa::path(
    put,
    path = "/api/articles/{id}",
    params(
        ("id" = i64, Path, description = "Article ID")
    ),
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Article updated", body = MessageResponse),
        (status = 400, description = "Invalid id or missing fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the article's creator"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles",
    security(("bearer" = []))
)]
pub async fn update_article(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ArticleRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id, "article")?;
    let Json(payload) = payload?;
    let article = article_input(payload)?;

    require_owner(state.db.as_ref(), ResourceKind::Article, id, &claims).await?;

    if !state.db.update_article(id, &article).await? {
        return Err(AppError::NotFound("Article not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Article updated")))
}

/// Delete your own article, along with its comments.
#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    params(
        ("id" = i64, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Article deleted", body = MessageResponse),
        (status = 400, description = "Non-integer id"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the article's creator"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles",
    security(("bearer" = []))
)]
pub async fn delete_article(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id, "article")?;

    require_owner(state.db.as_ref(), ResourceKind::Article, id, &claims).await?;

    if !state.db.delete_article(id).await? {
        return Err(AppError::NotFound("Article not found".to_string()));
    }

    tracing::info!(article_id = id, user_id = claims.user_id(), "article deleted");

    Ok(Json(MessageResponse::new("Article deleted")))
}
