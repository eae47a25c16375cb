//! Authentication API handlers
//!
//! Implements:
//! - POST /api/login - Sign in and return an enriched token
//! - POST /api/register - Sign up, create the local record, return an enriched token
//! - POST /api/logout - Revoke the provider session
//! - GET /api/auth/whoami - Return the snapshot embedded in the caller's token

use artcafe_auth::{
    validate, AuthError, AuthIdentity, AuthUser, Credentials, FailureReason, Role,
    TokenIdentity, VerifiedIdentity,
};
use artcafe_common::{Result, ValidatedJson};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::UsersState;
use crate::domain::auth::is_self_assignable;
use crate::domain::entities::{CreateUser, FindUserByEmail};

/// Request for password sign-in
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// Request for registration
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 256))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(default)]
    pub role: Role,
}

/// Response carrying an enriched bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct SignOnResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Response shape for `GET /api/auth/whoami`
#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub user: AuthIdentity,
}

/// POST /api/login - Sign in and return an enriched token
pub async fn login(
    State(state): State<UsersState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<SignOnResponse>> {
    let provider = state.auth.provider();
    let users = &state.repos.users;

    let (session_token, user) = validate(
        Credentials::new(req.email, req.password),
        |credentials| async move { provider.sign_in(&credentials).await },
        |identity: VerifiedIdentity| async move {
            users
                .find_first(FindUserByEmail {
                    email: &identity.email,
                })
                .await
        },
        None,
    )
    .await?;

    let token = state
        .auth
        .codec()
        .embed(&session_token, &AuthIdentity::from(user))?;

    Ok(Json(SignOnResponse { token }))
}

/// POST /api/register - Sign up and create the local user with score 0
pub async fn register(
    State(state): State<UsersState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<SignOnResponse>> {
    if !is_self_assignable(req.role) {
        tracing::info!(email = %req.email, role = %req.role, "Refused self-registration role");
        return Err(AuthError::Forbidden.into());
    }

    let provider = state.auth.provider();
    let users = &state.repos.users;
    let RegisterRequest {
        email,
        password,
        name,
        role,
    } = req;

    let (session_token, user) = validate(
        Credentials::new(email, password),
        |credentials| async move { provider.sign_up(&credentials).await },
        |identity: VerifiedIdentity| async move {
            users
                .create(CreateUser::registration(identity.email, name, role))
                .await
                .map(Some)
        },
        None,
    )
    .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");

    let token = state
        .auth
        .codec()
        .embed(&session_token, &AuthIdentity::from(user))?;

    Ok(Json(SignOnResponse { token }))
}

/// POST /api/logout - Revoke the caller's provider session
pub async fn logout(
    AuthUser(ctx): AuthUser,
    State(state): State<UsersState>,
) -> Result<Json<LogoutResponse>> {
    state
        .auth
        .provider()
        .sign_out(&ctx.session_token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, user_id = %ctx.user.id, "Provider sign-out failed");
            AuthError::failure_with(FailureReason::InvalidSession, e)
        })?;

    tracing::info!(user_id = %ctx.user.id, "User logged out");

    Ok(Json(LogoutResponse {
        message: "Logout successful".to_string(),
    }))
}

/// GET /api/auth/whoami - Return the snapshot embedded in the caller's token
pub async fn whoami(TokenIdentity(user): TokenIdentity) -> Result<Json<WhoamiResponse>> {
    Ok(Json(WhoamiResponse { user }))
}
