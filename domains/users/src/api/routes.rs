//! Route definitions for the Users domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, users};
use super::middleware::UsersState;

/// Create authentication routes
fn auth_routes() -> Router<UsersState> {
    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/register", post(auth::register))
        .route("/api/logout", post(auth::logout))
        .route("/api/auth/whoami", get(auth::whoami))
}

/// Create user management routes
fn user_routes() -> Router<UsersState> {
    Router::new()
        .route("/api/users/new_creators", get(users::new_creators))
        .route("/api/users/accounts/{email}", get(users::get_user_by_email))
        .route(
            "/api/users/{user_id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
}

/// Create all Users domain API routes
pub fn routes() -> Router<UsersState> {
    Router::new().merge(auth_routes()).merge(user_routes())
}
