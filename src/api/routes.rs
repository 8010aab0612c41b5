use crate::AppState;
use crate::api::handlers::{articles, auth, comments, health};
use crate::auth::jwt::AuthService;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Upper bound on request bodies; articles are text only.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Routes mounted under `/api`.
///
/// Protected routes sit behind the bearer-token middleware via `route_layer`,
/// so unknown paths still fall through to 404 instead of 401.
pub fn create_router(auth_service: Arc<AuthService>) -> Router<AppState> {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/articles", get(articles::list_articles))
        .route("/articles/{id}", get(articles::get_article))
        .route("/articles/{id}/comments", get(comments::list_comments));

    let protected_routes = Router::new()
        // Protected routes (auth required)
        .route("/auth/me", get(auth::me))
        .route("/articles", post(articles::create_article))
        .route(
            "/articles/{id}",
            put(articles::update_article).delete(articles::delete_article),
        )
        .route("/articles/{id}/comments", post(comments::create_comment))
        .route(
            "/comments/{id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            crate::auth::middleware::auth_middleware,
        ));

    public_routes.merge(protected_routes)
}

/// The complete application: health probe, `/api`, and the tower layers.
pub fn create_app(state: AppState) -> Router {
    let app = Router::new()
        .route("/health", get(health::health))
        .nest("/api", create_router(state.auth_service.clone()));

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        app.merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", crate::api::ApiDoc::openapi()),
        )
    };

    app.layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
