//! JWT claims types

use serde::{Deserialize, Serialize};

use crate::types::AuthIdentity;

/// Name of the claim that carries the embedded user snapshot
pub const USER_CLAIM: &str = "user";

/// Untyped claim set. Enrichment must preserve every provider-specific
/// claim, so the codec never round-trips through a fixed struct.
pub type ClaimSet = serde_json::Map<String, serde_json::Value>;

/// JWT claims issued by Supabase for a password session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupabaseClaims {
    /// Subject (provider user ID)
    pub sub: String,
    pub email: Option<String>,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
    pub aud: String,
    /// Postgres role, `authenticated` for signed-in users
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Typed view of an enriched token
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichedClaims {
    pub sub: String,
    pub exp: u64,
    pub user: AuthIdentity,
}
