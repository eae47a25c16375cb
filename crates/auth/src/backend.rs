//! Concrete authentication backend
//!
//! Wraps `PgPool`, the token codec and the auth provider, and owns the
//! identity read query. Uses runtime `sqlx::query_as` like the domain
//! repositories.

use sqlx::PgPool;
use std::sync::Arc;

use crate::codec::TokenCodec;
use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::{AuthError, FailureReason};
use crate::provider::{AuthProvider, AuthProviderFactory};
use crate::types::AuthIdentity;

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    pool: PgPool,
    codec: TokenCodec,
    provider: Arc<dyn AuthProvider>,
}

impl AuthBackend {
    /// Build the backend from configuration, selecting the provider.
    pub fn new(pool: PgPool, config: &AuthConfig) -> Result<Self, AuthError> {
        let codec = TokenCodec::new(&config.jwt_secret)?;
        let provider = AuthProviderFactory::create(config)?;
        Ok(Self::with_provider(pool, codec, provider))
    }

    pub fn with_provider(
        pool: PgPool,
        codec: TokenCodec,
        provider: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            pool,
            codec,
            provider,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn provider(&self) -> &dyn AuthProvider {
        self.provider.as_ref()
    }

    /// Find user identity by email (the provider join key)
    pub(crate) async fn find_identity_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AuthIdentity>, AuthError> {
        sqlx::query_as::<_, AuthIdentity>(
            r#"
            SELECT id, email, name, role, score, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, email = %email, "Failed to load user");
            AuthError::UserLoadError
        })
    }

    /// Authenticate an enriched bearer token.
    ///
    /// The embedded snapshot is never trusted for authorization: the token is
    /// stripped, the provider introspects the bare session and the current
    /// record is read from the store.
    pub(crate) async fn authenticate_token(&self, token: &str) -> Result<AuthContext, AuthError> {
        let session_token = self.codec.strip(token)?;

        let provider_user = self.provider.get_user(&session_token).await.map_err(|e| {
            tracing::info!(error = %e, "Provider rejected session");
            AuthError::failure_with(FailureReason::InvalidSession, e)
        })?;

        let email = provider_user
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AuthError::failure(FailureReason::NoSession))?;

        let user = self
            .find_identity_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AuthContext::new(user, token.to_string(), session_token))
    }
}
