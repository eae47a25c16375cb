//! Object3D repository

use artcafe_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{CreateObject3D, Object3D, UpdateObject3DFields};

const OBJECT_COLUMNS: &str = "id, place_id, data, created_at, updated_at";

#[derive(Clone)]
pub struct Object3DRepository {
    pool: PgPool,
}

impl Object3DRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Object3D>> {
        let query = format!("SELECT {OBJECT_COLUMNS} FROM object3ds WHERE id = $1");
        let object = sqlx::query_as::<_, Object3D>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(object)
    }

    pub async fn list_by_place(&self, place_id: Uuid) -> Result<Vec<Object3D>> {
        let query = format!(
            "SELECT {OBJECT_COLUMNS} FROM object3ds \
             WHERE place_id = $1 ORDER BY created_at ASC"
        );
        let objects = sqlx::query_as::<_, Object3D>(&query)
            .bind(place_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(objects)
    }

    /// Create an object; an unknown `place_id` is a foreign-key violation
    pub async fn create(&self, object: CreateObject3D) -> Result<Object3D> {
        let query = format!(
            "INSERT INTO object3ds (place_id, data) VALUES ($1, $2) RETURNING {OBJECT_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Object3D>(&query)
            .bind(object.place_id)
            .bind(&object.data)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    pub async fn update(&self, id: Uuid, fields: UpdateObject3DFields) -> Result<Option<Object3D>> {
        let query = format!(
            "UPDATE object3ds SET \
                 place_id = COALESCE($2, place_id), \
                 data = COALESCE($3, data), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {OBJECT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Object3D>(&query)
            .bind(id)
            .bind(fields.place_id)
            .bind(fields.data)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Object3D>> {
        let query = format!("DELETE FROM object3ds WHERE id = $1 RETURNING {OBJECT_COLUMNS}");
        let deleted = sqlx::query_as::<_, Object3D>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(deleted)
    }
}
