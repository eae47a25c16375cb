//! Auth read-model types
//!
//! Lightweight views of the `users` rows owned by the users domain, carrying
//! only what authentication and authorization need.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Application role stored on the local user record
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_role")]
pub enum Role {
    Admin,
    Creator,
    #[default]
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Creator => write!(f, "Creator"),
            Role::User => write!(f, "User"),
        }
    }
}

/// Snapshot of a local user record.
///
/// This is the value embedded under the `user` claim of an enriched token.
/// Timestamps serialize as RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

/// Email/password pair submitted at login or registration
///
/// Request DTOs validate the raw input before it gets here.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
