//! Object3D API handlers
//!
//! Scene payloads travel as standard base64 in JSON bodies and are stored as
//! raw bytes.

use artcafe_auth::{AdminUser, AuthUser};
use artcafe_common::{Error, Result, ValidatedJson};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::PlacesState;
use crate::domain::entities::{CreateObject3D, Object3D, UpdateObject3DFields};

/// Object3D response DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct Object3DResponse {
    pub id: Uuid,
    pub place_id: Uuid,
    /// Base64-encoded scene payload
    pub data: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Object3D> for Object3DResponse {
    fn from(o: Object3D) -> Self {
        Self {
            id: o.id,
            place_id: o.place_id,
            data: STANDARD.encode(&o.data),
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateObject3DRequest {
    pub place_id: Uuid,
    #[validate(length(min = 1))]
    pub data: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateObject3DRequest {
    pub place_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub data: Option<String>,
}

fn decode_payload(data: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(data.trim())
        .map_err(|_| Error::Validation("data must be base64-encoded".to_string()))
}

fn object_not_found() -> Error {
    Error::NotFound("Object not found".to_string())
}

/// GET /api/places/{place_id}/objects
pub async fn objects_for_place(
    AuthUser(_ctx): AuthUser,
    State(state): State<PlacesState>,
    Path(place_id): Path<Uuid>,
) -> Result<Json<Vec<Object3DResponse>>> {
    let objects = state.repos.objects.list_by_place(place_id).await?;
    Ok(Json(objects.into_iter().map(Into::into).collect()))
}

/// GET /api/objects/{object_id}
pub async fn get_object(
    AuthUser(_ctx): AuthUser,
    State(state): State<PlacesState>,
    Path(object_id): Path<Uuid>,
) -> Result<Json<Object3DResponse>> {
    let object = state
        .repos
        .objects
        .find(object_id)
        .await?
        .ok_or_else(object_not_found)?;

    Ok(Json(object.into()))
}

/// POST /api/objects
pub async fn create_object(
    AdminUser(ctx): AdminUser,
    State(state): State<PlacesState>,
    ValidatedJson(req): ValidatedJson<CreateObject3DRequest>,
) -> Result<(StatusCode, Json<Object3DResponse>)> {
    let create = CreateObject3D {
        place_id: req.place_id,
        data: decode_payload(&req.data)?,
    };

    let created = state.repos.objects.create(create).await?;

    tracing::info!(
        object_id = %created.id,
        place_id = %created.place_id,
        size = created.data.len(),
        by = %ctx.user.id,
        "Object created"
    );
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PATCH /api/objects/{object_id}
pub async fn update_object(
    AdminUser(ctx): AdminUser,
    State(state): State<PlacesState>,
    Path(object_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateObject3DRequest>,
) -> Result<Json<Object3DResponse>> {
    let fields = UpdateObject3DFields {
        place_id: req.place_id,
        data: req.data.as_deref().map(decode_payload).transpose()?,
    };
    if fields.is_empty() {
        return Err(Error::Validation("No fields to update".to_string()));
    }

    let updated = state
        .repos
        .objects
        .update(object_id, fields)
        .await?
        .ok_or_else(object_not_found)?;

    tracing::info!(object_id = %object_id, by = %ctx.user.id, "Object updated");
    Ok(Json(updated.into()))
}

/// DELETE /api/objects/{object_id} - Returns the deleted record
pub async fn delete_object(
    AdminUser(ctx): AdminUser,
    State(state): State<PlacesState>,
    Path(object_id): Path<Uuid>,
) -> Result<Json<Object3DResponse>> {
    let deleted = state
        .repos
        .objects
        .delete(object_id)
        .await?
        .ok_or_else(object_not_found)?;

    tracing::info!(object_id = %object_id, by = %ctx.user.id, "Object deleted");
    Ok(Json(deleted.into()))
}
