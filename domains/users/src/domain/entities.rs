//! Users domain entities and typed store queries

use artcafe_auth::AuthIdentity;
pub use artcafe_auth::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local user record. Email is the join key with the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for AuthIdentity {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            score: user.score,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FindUserByEmail<'a> {
    pub email: &'a str,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub score: i32,
}

impl CreateUser {
    /// A freshly registered user starts with no score
    pub fn registration(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role,
            score: 0,
        }
    }
}

/// Partial update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateUserFields {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub score: Option<i32>,
}

impl UpdateUserFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.role.is_none() && self.score.is_none()
    }

    /// Whether the update touches fields only an admin may change
    pub fn is_privileged(&self) -> bool {
        self.role.is_some() || self.score.is_some()
    }
}
