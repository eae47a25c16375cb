//! ArtCafe API application composition root
//!
//! Composes all domain routers into a single application.

use artcafe_auth::{AuthBackend, AuthConfig};
use artcafe_common::Config;
use artcafe_places::{PlacesRepositories, PlacesState};
use artcafe_users::{UsersRepositories, UsersState};
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use sqlx::PgPool;

/// Create the main application router from startup configuration.
///
/// A missing JWT secret or an unusable provider setting is fatal here.
pub fn create_app(config: &Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let auth_config = AuthConfig::from(config);
    let auth = AuthBackend::new(pool.clone(), &auth_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialise authentication: {}", e))?;

    tracing::info!(provider = %auth_config.provider, "Authentication backend ready");

    Ok(build_router(pool, auth))
}

/// Compose domain routers with shared infrastructure routes
pub fn build_router(pool: PgPool, auth: AuthBackend) -> Router {
    let users_state = UsersState {
        repos: UsersRepositories::new(pool.clone()),
        auth: auth.clone(),
    };

    let places_state = PlacesState {
        repos: PlacesRepositories::new(pool),
        auth,
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        .merge(artcafe_users::routes().with_state(users_state))
        .merge(artcafe_places::routes().with_state(places_state))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the ArtCafe API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
