//! Authentication configuration

use artcafe_common::Config;

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Shared HS256 secret
    pub jwt_secret: String,
    /// Auth provider (supabase, mock)
    pub provider: String,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("provider", &self.provider)
            .field("supabase_url", &self.supabase_url)
            .field(
                "supabase_anon_key",
                &self.supabase_anon_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        let non_empty = |value: &str| Some(value.to_string()).filter(|v| !v.is_empty());

        Self {
            jwt_secret: config.jwt_secret.clone(),
            provider: config.auth_provider.clone(),
            supabase_url: non_empty(&config.supabase_url),
            supabase_anon_key: non_empty(&config.supabase_anon_key),
        }
    }
}
