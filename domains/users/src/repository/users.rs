//! User repository

use artcafe_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{CreateUser, FindUserByEmail, Role, UpdateUserFields, User};

/// All columns in the users table, used for SELECT and RETURNING clauses.
const USER_COLUMNS: &str = "id, email, name, role, score, created_at, updated_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_first(&self, by: FindUserByEmail<'_>) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(by.email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// List users holding a role, newest first
    pub async fn list_by_role(&self, role: Role, limit: i64, offset: i64) -> Result<Vec<User>> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE role = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        let users = sqlx::query_as::<_, User>(&query)
            .bind(role)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Create a new user
    pub async fn create(&self, user: CreateUser) -> Result<User> {
        let query = format!(
            "INSERT INTO users (email, name, role, score) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );
        let created = sqlx::query_as::<_, User>(&query)
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.role)
            .bind(user.score)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Apply a partial update
    pub async fn update(&self, id: Uuid, fields: UpdateUserFields) -> Result<Option<User>> {
        let query = format!(
            "UPDATE users SET \
                 name = COALESCE($2, name), \
                 role = COALESCE($3, role), \
                 score = COALESCE($4, score), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(fields.name)
            .bind(fields.role)
            .bind(fields.score)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Delete a user, returning the removed record
    pub async fn delete(&self, id: Uuid) -> Result<Option<User>> {
        let query = format!("DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}");
        let deleted = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(deleted)
    }
}
