//! Repository implementations for the Places domain

pub mod objects;
pub mod places;

use sqlx::PgPool;

pub use objects::Object3DRepository;
pub use places::PlaceRepository;

/// Combined repository access for the Places domain
#[derive(Clone)]
pub struct PlacesRepositories {
    pub places: PlaceRepository,
    pub objects: Object3DRepository,
}

impl PlacesRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            places: PlaceRepository::new(pool.clone()),
            objects: Object3DRepository::new(pool),
        }
    }
}
