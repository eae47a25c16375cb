//! Route definitions for the Places domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{objects, places};
use super::middleware::PlacesState;

/// Create place routes
fn place_routes() -> Router<PlacesState> {
    Router::new()
        .route("/api/places", post(places::create_place))
        .route("/api/places/recent", get(places::recent_places))
        .route("/api/places/city/{city}", get(places::places_by_city))
        .route("/api/places/user/{user_id}", get(places::places_by_user))
        .route(
            "/api/places/{place_id}",
            get(places::get_place)
                .patch(places::update_place)
                .delete(places::delete_place),
        )
}

/// Create Object3D routes
fn object_routes() -> Router<PlacesState> {
    Router::new()
        .route(
            "/api/places/{place_id}/objects",
            get(objects::objects_for_place),
        )
        .route("/api/objects", post(objects::create_object))
        .route(
            "/api/objects/{object_id}",
            get(objects::get_object)
                .patch(objects::update_object)
                .delete(objects::delete_object),
        )
}

/// Create all Places domain API routes
pub fn routes() -> Router<PlacesState> {
    Router::new().merge(place_routes()).merge(object_routes())
}
