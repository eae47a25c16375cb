//! Place API handlers
//!
//! Reads are open to any authenticated user; mutations require Admin.

use artcafe_auth::{AdminUser, AuthUser};
use artcafe_common::{Error, Pagination, Result, ValidatedJson};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::PlacesState;
use crate::domain::entities::{CreatePlace, Importance, Place, UpdatePlaceFields, RECENT_PLACES};

/// Place response DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceResponse {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub country: String,
    pub geolocation: String,
    pub importance: Importance,
    pub story: String,
    pub uri: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Place> for PlaceResponse {
    fn from(p: Place) -> Self {
        Self {
            id: p.id,
            name: p.name,
            city: p.city,
            country: p.country,
            geolocation: p.geolocation,
            importance: p.importance,
            story: p.story,
            uri: p.uri,
            user_id: p.user_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Request for creating a place
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlaceRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[validate(length(min = 1, max = 100))]
    pub geolocation: String,
    pub importance: Importance,
    #[validate(length(max = 20000))]
    pub story: String,
    #[validate(length(min = 1, max = 2048))]
    pub uri: String,
    pub user_id: Option<Uuid>,
}

impl From<CreatePlaceRequest> for CreatePlace {
    fn from(req: CreatePlaceRequest) -> Self {
        Self {
            name: req.name,
            city: req.city,
            country: req.country,
            geolocation: req.geolocation,
            importance: req.importance,
            story: req.story,
            uri: req.uri,
            user_id: req.user_id,
        }
    }
}

/// Request for updating a place
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlaceRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub country: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub geolocation: Option<String>,
    pub importance: Option<Importance>,
    #[validate(length(max = 20000))]
    pub story: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub uri: Option<String>,
    /// Absent leaves the contributor, `null` clears it
    #[serde(default, deserialize_with = "present")]
    pub user_id: Option<Option<Uuid>>,
}

/// Distinguish an explicit `null` from an absent field
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdatePlaceRequest> for UpdatePlaceFields {
    fn from(req: UpdatePlaceRequest) -> Self {
        Self {
            name: req.name,
            city: req.city,
            country: req.country,
            geolocation: req.geolocation,
            importance: req.importance,
            story: req.story,
            uri: req.uri,
            user_id: req.user_id,
        }
    }
}

fn place_not_found() -> Error {
    Error::NotFound("Place not found".to_string())
}

fn into_responses(places: Vec<Place>) -> Json<Vec<PlaceResponse>> {
    Json(places.into_iter().map(Into::into).collect())
}

/// GET /api/places/recent
pub async fn recent_places(
    AuthUser(_ctx): AuthUser,
    State(state): State<PlacesState>,
) -> Result<Json<Vec<PlaceResponse>>> {
    let places = state.repos.places.list_recent(RECENT_PLACES).await?;
    Ok(into_responses(places))
}

/// GET /api/places/{place_id}
pub async fn get_place(
    AuthUser(_ctx): AuthUser,
    State(state): State<PlacesState>,
    Path(place_id): Path<Uuid>,
) -> Result<Json<PlaceResponse>> {
    let place = state
        .repos
        .places
        .find(place_id)
        .await?
        .ok_or_else(place_not_found)?;

    Ok(Json(place.into()))
}

/// GET /api/places/city/{city}
pub async fn places_by_city(
    AuthUser(_ctx): AuthUser,
    State(state): State<PlacesState>,
    Path(city): Path<String>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<PlaceResponse>>> {
    let places = state
        .repos
        .places
        .list_by_city(&city, page.limit(), page.offset())
        .await?;

    Ok(into_responses(places))
}

/// GET /api/places/user/{user_id}
pub async fn places_by_user(
    AuthUser(_ctx): AuthUser,
    State(state): State<PlacesState>,
    Path(user_id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<PlaceResponse>>> {
    let places = state
        .repos
        .places
        .list_by_user(user_id, page.limit(), page.offset())
        .await?;

    Ok(into_responses(places))
}

/// POST /api/places
pub async fn create_place(
    AdminUser(ctx): AdminUser,
    State(state): State<PlacesState>,
    ValidatedJson(req): ValidatedJson<CreatePlaceRequest>,
) -> Result<(StatusCode, Json<PlaceResponse>)> {
    let created = state.repos.places.create(req.into()).await?;

    tracing::info!(place_id = %created.id, by = %ctx.user.id, "Place created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PATCH /api/places/{place_id}
pub async fn update_place(
    AdminUser(ctx): AdminUser,
    State(state): State<PlacesState>,
    Path(place_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdatePlaceRequest>,
) -> Result<Json<PlaceResponse>> {
    let fields = UpdatePlaceFields::from(req);
    if fields.is_empty() {
        return Err(Error::Validation("No fields to update".to_string()));
    }

    let updated = state
        .repos
        .places
        .update(place_id, fields)
        .await?
        .ok_or_else(place_not_found)?;

    tracing::info!(place_id = %place_id, by = %ctx.user.id, "Place updated");
    Ok(Json(updated.into()))
}

/// DELETE /api/places/{place_id} - Returns the deleted record
pub async fn delete_place(
    AdminUser(ctx): AdminUser,
    State(state): State<PlacesState>,
    Path(place_id): Path<Uuid>,
) -> Result<Json<PlaceResponse>> {
    let deleted = state
        .repos
        .places
        .delete(place_id)
        .await?
        .ok_or_else(place_not_found)?;

    tracing::info!(place_id = %place_id, by = %ctx.user.id, "Place deleted");
    Ok(Json(deleted.into()))
}
