//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Pressroom, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Authentication (`/api/auth`)
//! - `POST /api/auth/register` - Register new user
//! - `POST /api/auth/login` - Login and receive a bearer token
//! - `GET /api/auth/me` - Echo the claims of the presented token
//!
//! ## Articles (`/api/articles`)
//! - `GET /api/articles` - List articles (public)
//! - `GET /api/articles/{id}` - Get one article (public)
//! - `POST /api/articles` - Create an article
//! - `PUT /api/articles/{id}` - Update your own article
//! - `DELETE /api/articles/{id}` - Delete your own article
//!
//! ## Comments
//! - `GET /api/articles/{id}/comments` - List comments on an article (public)
//! - `POST /api/articles/{id}/comments` - Comment on an article
//! - `PUT /api/comments/{id}` - Update your own comment
//! - `DELETE /api/comments/{id}` - Delete your own comment
//!
//! ## Health
//! - `GET /health` - Liveness probe
//!
//! # Authentication
//!
//! Every mutating endpoint requires a token in the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use crate::types::{
    ArticleRequest, ArticleView, Claims, CommentRequest, CommentView, CreatedResponse,
    CredentialsRequest, LoginResponse, MeResponse, MessageResponse,
};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the bearer token scheme referenced by protected operations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let mut scheme = Http::new(HttpAuthScheme::Bearer);
        scheme.bearer_format = Some("JWT".to_string());
        components.add_security_scheme("bearer", SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pressroom API",
        description = "Articles and comments with token authentication and creator-only edits."
    ),
    paths(
        handlers::health::health,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::articles::list_articles,
        handlers::articles::get_article,
        handlers::articles::create_article,
        handlers::articles::update_article,
        handlers::articles::delete_article,
        handlers::comments::list_comments,
        handlers::comments::create_comment,
        handlers::comments::update_comment,
        handlers::comments::delete_comment,
    ),
    components(schemas(
        CredentialsRequest,
        LoginResponse,
        Claims,
        MeResponse,
        ArticleRequest,
        ArticleView,
        CommentRequest,
        CommentView,
        MessageResponse,
        CreatedResponse,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "auth", description = "Registration, login and token introspection"),
        (name = "articles", description = "Article CRUD"),
        (name = "comments", description = "Comment CRUD"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
