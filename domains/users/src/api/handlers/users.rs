//! User management API handlers
//!
//! - GET /api/users/{user_id} - Get a user (admin or self)
//! - GET /api/users/accounts/{email} - Look a user up by email
//! - GET /api/users/new_creators - Newest creators
//! - PATCH /api/users/{user_id} - Update a user (admin or self)
//! - DELETE /api/users/{user_id} - Delete a user (admin or self)

use artcafe_auth::AuthUser;
use artcafe_common::{Error, Pagination, Result, ValidatedJson};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::UsersState;
use crate::domain::auth::{authorize_user_access, authorize_user_update};
use crate::domain::entities::{FindUserByEmail, Role, UpdateUserFields, User};

/// Response for user record operations
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            score: user.score,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Request for updating a user
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub role: Option<Role>,

    #[validate(range(min = 0))]
    pub score: Option<i32>,
}

impl From<UpdateUserRequest> for UpdateUserFields {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            role: req.role,
            score: req.score,
        }
    }
}

fn user_not_found() -> Error {
    Error::NotFound("User not found".to_string())
}

/// GET /api/users/{user_id}
pub async fn get_user(
    AuthUser(ctx): AuthUser,
    State(state): State<UsersState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>> {
    authorize_user_access(&ctx, user_id)?;

    let user = state
        .repos
        .users
        .find(user_id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Json(user.into()))
}

/// GET /api/users/accounts/{email}
pub async fn get_user_by_email(
    AuthUser(_ctx): AuthUser,
    State(state): State<UsersState>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = state
        .repos
        .users
        .find_first(FindUserByEmail { email: &email })
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Json(user.into()))
}

/// GET /api/users/new_creators
pub async fn new_creators(
    AuthUser(_ctx): AuthUser,
    State(state): State<UsersState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<UserResponse>>> {
    let users = state
        .repos
        .users
        .list_by_role(Role::Creator, page.limit(), page.offset())
        .await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// PATCH /api/users/{user_id}
pub async fn update_user(
    AuthUser(ctx): AuthUser,
    State(state): State<UsersState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let fields = UpdateUserFields::from(req);
    authorize_user_update(&ctx, user_id, &fields)?;

    if fields.is_empty() {
        return Err(Error::Validation("No fields to update".to_string()));
    }

    let updated = state
        .repos
        .users
        .update(user_id, fields)
        .await?
        .ok_or_else(user_not_found)?;

    tracing::info!(user_id = %user_id, by = %ctx.user.id, "User updated");
    Ok(Json(updated.into()))
}

/// DELETE /api/users/{user_id} - Returns the deleted record
pub async fn delete_user(
    AuthUser(ctx): AuthUser,
    State(state): State<UsersState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>> {
    authorize_user_access(&ctx, user_id)?;

    let deleted = state
        .repos
        .users
        .delete(user_id)
        .await?
        .ok_or_else(user_not_found)?;

    tracing::info!(user_id = %user_id, by = %ctx.user.id, "User deleted");
    Ok(Json(deleted.into()))
}
