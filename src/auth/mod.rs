//! Session Tokens, Authentication Gate and Ownership Checks
//!
//! This module provides the authorization layer for the Pressroom API.
//!
//! # Module Structure
//!
//! - [`auth::jwt`](crate::auth::jwt) - Token issuance/verification and password hashing
//! - [`auth::middleware`](crate::auth::middleware) - Axum bearer-token gate and the `AuthUser` extractor
//! - [`auth::ownership`](crate::auth::ownership) - Per-resource ownership guard for mutations
//!
//! # Security Features
//!
//! - **Password Hashing**: Uses Argon2id (memory-hard) for password storage
//! - **Session Tokens**: HS256 signed, stateless, expire after a fixed lifetime
//! - **No oracle**: expired and forged tokens produce the same 401 response
//! - **Ownership**: only the creator of an article or comment may change it
//!
//! # Usage
//!
//! ## Middleware
//!
//! ```ignore
//! use pressroom::auth::middleware::auth_middleware;
//!
//! let app = Router::new()
//!     .route("/protected", get(handler))
//!     .route_layer(middleware::from_fn_with_state(auth_service, auth_middleware));
//! ```
//!
//! ## Extracting Claims in Handlers
//!
//! ```ignore
//! async fn protected_handler(AuthUser(claims): AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", claims.email)
//! }
//! ```
//!
//! # Configuration
//!
//! Configure via `pressroom.toml`:
//! ```toml
//! [auth]
//! jwt_secret_env = "JWT_SECRET"   # env var holding the signing secret (min 32 chars)
//! token_expiry_secs = 3600        # Token validity duration
//! ```

/// Token service and password hashing.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
/// Resource ownership guard.
pub mod ownership;
