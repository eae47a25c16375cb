//! Enriched session tokens
//!
//! A provider session token is decoded, extended with a `user` claim holding
//! the local user snapshot, and re-signed with the shared HS256 secret.
//! Stripping removes the claim and re-signs the remaining claims, which the
//! provider accepts as the original session because it shares the secret.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::collections::HashSet;
use std::fmt;

use crate::claims::{ClaimSet, EnrichedClaims, USER_CLAIM};
use crate::error::{AuthError, FailureReason};
use crate::types::AuthIdentity;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Reversible user-snapshot embedding for provider session tokens
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &ALGORITHM)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl TokenCodec {
    /// Build the codec from the process-wide secret.
    ///
    /// An empty secret is a configuration error; there is no fallback.
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::Configuration(
                "JWT secret is not configured".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Embed a user snapshot into a provider session token.
    ///
    /// The provider's signature is not checked here: the token comes straight
    /// from the provider's sign-in response. An existing `user` claim is
    /// replaced, never merged.
    pub fn embed(&self, session_token: &str, user: &AuthIdentity) -> Result<String, AuthError> {
        let mut claims = read_unverified(session_token)?;

        let snapshot = serde_json::to_value(user).map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id, "Failed to serialize user snapshot");
            AuthError::MalformedToken("user snapshot is not serializable".to_string())
        })?;
        claims.insert(USER_CLAIM.to_string(), snapshot);

        self.sign(&claims)
    }

    /// Remove the embedded snapshot, yielding a bare session token.
    pub fn strip(&self, enriched_token: &str) -> Result<String, AuthError> {
        let mut claims = self.read_signed(enriched_token)?;

        if claims.remove(USER_CLAIM).is_none() {
            return Err(AuthError::MalformedToken(
                "token carries no user claim".to_string(),
            ));
        }

        self.sign(&claims)
    }

    /// Read the embedded snapshot after checking signature and expiry.
    pub fn embedded_user(&self, enriched_token: &str) -> Result<AuthIdentity, AuthError> {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_aud = false;

        let data = decode::<EnrichedClaims>(enriched_token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AuthError::failure_with(FailureReason::InvalidSession, e)
                }
                _ => {
                    tracing::debug!(error = %e, "Enriched token rejected");
                    AuthError::MalformedToken("token is not a valid enriched token".to_string())
                }
            })?;

        Ok(data.claims.user)
    }

    fn read_signed(&self, token: &str) -> Result<ClaimSet, AuthError> {
        // Expiry belongs to the provider's introspection of the stripped token
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        decode::<ClaimSet>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Enriched token signature check failed");
                AuthError::MalformedToken("token signature is invalid".to_string())
            })
    }

    fn sign(&self, claims: &ClaimSet) -> Result<String, AuthError> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            AuthError::MalformedToken("token could not be signed".to_string())
        })
    }
}

fn read_unverified(token: &str) -> Result<ClaimSet, AuthError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    decode::<ClaimSet>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Session token could not be decoded");
            AuthError::MalformedToken("session token is not a JWT".to_string())
        })
}
