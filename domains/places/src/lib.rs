//! Places domain: places and the 3D scene objects attached to them

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use repository::{Object3DRepository, PlaceRepository, PlacesRepositories};

// Re-export API types
pub use api::routes;
pub use api::PlacesState;
