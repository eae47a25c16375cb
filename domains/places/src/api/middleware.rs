//! Places domain state and auth backend integration

use crate::PlacesRepositories;
use artcafe_auth::AuthBackend;
use axum::extract::FromRef;

/// Application state for the Places domain
#[derive(Clone)]
pub struct PlacesState {
    pub repos: PlacesRepositories,
    pub auth: AuthBackend,
}

impl FromRef<PlacesState> for AuthBackend {
    fn from_ref(state: &PlacesState) -> Self {
        state.auth.clone()
    }
}
