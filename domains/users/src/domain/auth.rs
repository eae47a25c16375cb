//! Authorization rules for user records

use artcafe_auth::{AuthContext, AuthError, Role};
use uuid::Uuid;

use crate::domain::entities::UpdateUserFields;

/// Read or delete access to a user record
pub fn authorize_user_access(ctx: &AuthContext, target: Uuid) -> Result<(), AuthError> {
    ctx.require_user_access(target)
}

/// Update access: admin or self, and only admins change role or score
pub fn authorize_user_update(
    ctx: &AuthContext,
    target: Uuid,
    fields: &UpdateUserFields,
) -> Result<(), AuthError> {
    ctx.require_user_access(target)?;

    if fields.is_privileged() && !ctx.is_admin() {
        tracing::info!(requester = %ctx.user.id, "Non-admin attempted privileged user update");
        return Err(AuthError::Forbidden);
    }

    Ok(())
}

/// Roles a caller may pick for themselves at registration
pub fn is_self_assignable(role: Role) -> bool {
    role != Role::Admin
}
