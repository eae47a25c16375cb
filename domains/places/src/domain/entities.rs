//! Domain entities for the Places domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of places returned by the recent feed
pub const RECENT_PLACES: i64 = 12;

/// Cultural importance of a place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "importance")]
pub enum Importance {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Importance::Low => write!(f, "Low"),
            Importance::Medium => write!(f, "Medium"),
            Importance::High => write!(f, "High"),
        }
    }
}

/// Place entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub country: String,
    pub geolocation: String,
    pub importance: Importance,
    pub story: String,
    pub uri: String,
    /// Contributing user, if any
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 3D scene asset attached to a place
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Object3D {
    pub id: Uuid,
    pub place_id: Uuid,
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreatePlace {
    pub name: String,
    pub city: String,
    pub country: String,
    pub geolocation: String,
    pub importance: Importance,
    pub story: String,
    pub uri: String,
    pub user_id: Option<Uuid>,
}

/// Partial update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePlaceFields {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub geolocation: Option<String>,
    pub importance: Option<Importance>,
    pub story: Option<String>,
    pub uri: Option<String>,
    /// `Some(None)` clears the contributor
    pub user_id: Option<Option<Uuid>>,
}

impl UpdatePlaceFields {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct CreateObject3D {
    pub place_id: Uuid,
    pub data: Vec<u8>,
}

/// Partial update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateObject3DFields {
    pub place_id: Option<Uuid>,
    pub data: Option<Vec<u8>>,
}

impl UpdateObject3DFields {
    pub fn is_empty(&self) -> bool {
        self.place_id.is_none() && self.data.is_none()
    }
}
