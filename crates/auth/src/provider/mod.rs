//! Auth provider clients
//!
//! The provider owns credentials and sessions. This crate only talks to it
//! through sign-in, sign-up, sign-out and session introspection:
//! - Supabase GoTrue REST client for production
//! - In-memory mock provider for tests and local development

pub mod mock;
pub mod supabase;

use std::sync::Arc;
use thiserror::Error;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::types::Credentials;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Auth provider configuration error: {0}")]
    Configuration(String),

    #[error("Auth provider request error: {0}")]
    Request(String),

    #[error("Auth provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Auth provider response error: {0}")]
    Response(String),
}

impl ProviderError {
    /// Message safe to return to the caller.
    ///
    /// Refusals carry the provider's own wording, transport failures do not.
    pub fn public_message(&self) -> String {
        match self {
            ProviderError::Rejected { message, .. } => message.clone(),
            _ => "auth provider unavailable".to_string(),
        }
    }
}

/// Provider-side identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderUser {
    pub id: String,
    pub email: Option<String>,
}

/// Outcome of a sign-in or sign-up call.
///
/// Either part may be absent: sign-up with email confirmation enabled returns
/// a user without a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSession {
    pub user: Option<ProviderUser>,
    pub access_token: Option<String>,
}

/// Auth provider trait for different implementations
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    /// Password sign-in
    async fn sign_in(&self, credentials: &Credentials) -> Result<ProviderSession, ProviderError>;

    /// Create a provider account
    async fn sign_up(&self, credentials: &Credentials) -> Result<ProviderSession, ProviderError>;

    /// Revoke the session behind a bare session token
    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError>;

    /// Resolve the identity behind a bare session token
    async fn get_user(&self, access_token: &str) -> Result<ProviderUser, ProviderError>;
}

/// Factory for creating AuthProvider implementations
pub struct AuthProviderFactory;

impl AuthProviderFactory {
    /// Create an AuthProvider based on configuration
    pub fn create(config: &AuthConfig) -> Result<Arc<dyn AuthProvider>, AuthError> {
        match config.provider.as_str() {
            "supabase" => {
                tracing::info!("Creating Supabase auth provider");
                let url = config.supabase_url.clone().ok_or_else(|| {
                    AuthError::Configuration("SUPABASE_URL is required".to_string())
                })?;
                let anon_key = config.supabase_anon_key.clone().ok_or_else(|| {
                    AuthError::Configuration("SUPABASE_ANON_KEY is required".to_string())
                })?;
                let client = supabase::SupabaseAuthProvider::new(url, anon_key)
                    .map_err(|e| AuthError::Configuration(e.to_string()))?;
                Ok(Arc::new(client))
            }
            "mock" => {
                tracing::info!("Creating mock auth provider");
                Ok(Arc::new(mock::MockAuthProvider::new(&config.jwt_secret)))
            }
            provider => Err(AuthError::Configuration(format!(
                "Unknown auth provider: {}. Supported providers: supabase, mock",
                provider
            ))),
        }
    }
}
