use super::{required, secret};
use crate::{
    auth::middleware::AuthUser,
    types::{
        AppError, CredentialsRequest, LoginResponse, MeResponse, MessageResponse, Result,
    },
    AppState,
};
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Missing email or password"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(payload) = payload?;
    let email = required(payload.email, "email")?;
    let password = secret(payload.password)?;

    let password_hash = state.auth_service.hash_password(&password)?;

    // The unique index on users.email decides duplicates.
    let user_id = state.db.create_user(&email, &password_hash).await?;

    tracing::info!(user_id, %email, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created")),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(payload) = payload?;
    let email = required(payload.email, "email")?;
    let password = secret(payload.password)?;

    let invalid = || AppError::Unauthenticated("Invalid email or password".to_string());

    let user = state
        .db
        .get_user_by_email(&email)
        .await?
        .ok_or_else(invalid)?;

    if !state
        .auth_service
        .verify_password(&password, &user.password_hash)?
    {
        return Err(invalid());
    }

    let token = state.auth_service.issue_token(user.id, &user.email)?;

    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        expires_in: state.auth_service.token_expiry(),
    }))
}

/// Return the identity claims of the presented token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Token is valid", body = MeResponse),
        (status = 401, description = "Missing, invalid or expired token")
    ),
    tag = "auth",
    security(("bearer" = []))
)]
pub async fn me(AuthUser(claims): AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        message: "Token OK".to_string(),
        user: claims,
    })
}
