//! Authorization context for authenticated users

use uuid::Uuid;

use crate::error::AuthError;
use crate::types::{AuthIdentity, Role};

/// Represents an authenticated request
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Local user record resolved from the provider session
    pub user: AuthIdentity,
    /// The enriched bearer token the request arrived with
    pub token: String,
    /// The bare provider session token behind it
    pub session_token: String,
}

impl AuthContext {
    pub fn new(user: AuthIdentity, token: String, session_token: String) -> Self {
        Self {
            user,
            token,
            session_token,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }

    /// Admins may act on any user; everyone else only on themselves
    pub fn can_access_user(&self, target: Uuid) -> bool {
        self.is_admin() || self.user.id == target
    }

    pub fn require_user_access(&self, target: Uuid) -> Result<(), AuthError> {
        if self.can_access_user(target) {
            Ok(())
        } else {
            tracing::info!(
                requester = %self.user.id,
                target = %target,
                "User access denied"
            );
            Err(AuthError::Forbidden)
        }
    }

    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            tracing::info!(requester = %self.user.id, role = %self.user.role, "Admin role required");
            Err(AuthError::Forbidden)
        }
    }
}
