//! Place repository

use artcafe_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{CreatePlace, Place, UpdatePlaceFields};

/// All columns in the places table, used for SELECT and RETURNING clauses.
const PLACE_COLUMNS: &str = "\
    id, name, city, country, geolocation, \
    importance, story, uri, user_id, \
    created_at, updated_at";

#[derive(Clone)]
pub struct PlaceRepository {
    pool: PgPool,
}

impl PlaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find place by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Place>> {
        let query = format!("SELECT {PLACE_COLUMNS} FROM places WHERE id = $1");
        let place = sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(place)
    }

    /// Newest places first
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Place>> {
        let query = format!("SELECT {PLACE_COLUMNS} FROM places ORDER BY created_at DESC LIMIT $1");
        let places = sqlx::query_as::<_, Place>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(places)
    }

    /// List places in a city (case-insensitive)
    pub async fn list_by_city(&self, city: &str, limit: i64, offset: i64) -> Result<Vec<Place>> {
        let query = format!(
            "SELECT {PLACE_COLUMNS} FROM places \
             WHERE lower(city) = lower($1) ORDER BY name ASC LIMIT $2 OFFSET $3"
        );
        let places = sqlx::query_as::<_, Place>(&query)
            .bind(city)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(places)
    }

    /// List places contributed by a user
    pub async fn list_by_user(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Place>> {
        let query = format!(
            "SELECT {PLACE_COLUMNS} FROM places \
             WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        let places = sqlx::query_as::<_, Place>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(places)
    }

    /// Create a new place
    pub async fn create(&self, place: CreatePlace) -> Result<Place> {
        let query = format!(
            "INSERT INTO places \
                 (name, city, country, geolocation, importance, story, uri, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {PLACE_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Place>(&query)
            .bind(&place.name)
            .bind(&place.city)
            .bind(&place.country)
            .bind(&place.geolocation)
            .bind(place.importance)
            .bind(&place.story)
            .bind(&place.uri)
            .bind(place.user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Apply a partial update
    pub async fn update(&self, id: Uuid, fields: UpdatePlaceFields) -> Result<Option<Place>> {
        let query = format!(
            "UPDATE places SET \
                 name = COALESCE($2, name), \
                 city = COALESCE($3, city), \
                 country = COALESCE($4, country), \
                 geolocation = COALESCE($5, geolocation), \
                 importance = COALESCE($6, importance), \
                 story = COALESCE($7, story), \
                 uri = COALESCE($8, uri), \
                 user_id = CASE WHEN $9 THEN $10 ELSE user_id END, \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {PLACE_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .bind(fields.name)
            .bind(fields.city)
            .bind(fields.country)
            .bind(fields.geolocation)
            .bind(fields.importance)
            .bind(fields.story)
            .bind(fields.uri)
            .bind(fields.user_id.is_some())
            .bind(fields.user_id.flatten())
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Delete a place and, by cascade, its objects. Returns the removed place.
    pub async fn delete(&self, id: Uuid) -> Result<Option<Place>> {
        let query = format!("DELETE FROM places WHERE id = $1 RETURNING {PLACE_COLUMNS}");
        let deleted = sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(deleted)
    }
}
