//! Mock auth provider
//!
//! Keeps accounts in memory and issues HS256 session tokens signed with the
//! shared JWT secret, shaped like GoTrue's. Introspection verifies signature,
//! expiry and audience and honours sign-out.
//! Thread-safe via `Arc<Mutex<>>`.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::claims::SupabaseClaims;
use crate::provider::{AuthProvider, ProviderError, ProviderSession, ProviderUser};
use crate::types::Credentials;

const AUDIENCE: &str = "authenticated";
const SESSION_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
struct MockAccount {
    id: String,
    password: String,
}

/// In-memory auth provider for tests and `AUTH_PROVIDER=mock`
#[derive(Clone)]
pub struct MockAuthProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    accounts: Arc<Mutex<HashMap<String, MockAccount>>>,
    revoked_sessions: Arc<Mutex<HashSet<String>>>,
}

impl std::fmt::Debug for MockAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAuthProvider").finish_non_exhaustive()
    }
}

impl MockAuthProvider {
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            accounts: Arc::new(Mutex::new(HashMap::new())),
            revoked_sessions: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Register an account directly, returning its provider ID.
    pub fn with_account(&self, email: &str, password: &str) -> String {
        let id = Uuid::new_v4().to_string();
        self.accounts
            .lock()
            .expect("accounts lock poisoned: prior test panicked")
            .insert(
                email.to_string(),
                MockAccount {
                    id: id.clone(),
                    password: password.to_string(),
                },
            );
        id
    }

    /// Emails of every registered account.
    pub fn registered_emails(&self) -> Vec<String> {
        let mut emails: Vec<String> = self
            .accounts
            .lock()
            .expect("accounts lock poisoned: prior test panicked")
            .keys()
            .cloned()
            .collect();
        emails.sort();
        emails
    }

    /// Number of sessions revoked through `sign_out`.
    pub fn revoked_count(&self) -> usize {
        self.revoked_sessions
            .lock()
            .expect("sessions lock poisoned: prior test panicked")
            .len()
    }

    fn accounts(&self) -> Result<MutexGuard<'_, HashMap<String, MockAccount>>, ProviderError> {
        self.accounts
            .lock()
            .map_err(|e| ProviderError::Request(format!("accounts lock poisoned: {e}")))
    }

    fn revoked(&self) -> Result<MutexGuard<'_, HashSet<String>>, ProviderError> {
        self.revoked_sessions
            .lock()
            .map_err(|e| ProviderError::Request(format!("sessions lock poisoned: {e}")))
    }

    fn issue_session(&self, id: &str, email: &str) -> Result<ProviderSession, ProviderError> {
        let now = Utc::now().timestamp().max(0) as u64;
        let claims = SupabaseClaims {
            sub: id.to_string(),
            email: Some(email.to_string()),
            iat: now,
            exp: now + SESSION_TTL_SECS,
            aud: AUDIENCE.to_string(),
            role: AUDIENCE.to_string(),
            session_id: Some(Uuid::new_v4().to_string()),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ProviderError::Response(format!("failed to sign session: {e}")))?;

        Ok(ProviderSession {
            user: Some(ProviderUser {
                id: id.to_string(),
                email: Some(email.to_string()),
            }),
            access_token: Some(token),
        })
    }

    fn verify(&self, access_token: &str) -> Result<SupabaseClaims, ProviderError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUDIENCE]);

        let claims = decode::<SupabaseClaims>(access_token, &self.decoding_key, &validation)
            .map_err(|e| ProviderError::Rejected {
                status: 401,
                message: format!("invalid JWT: {e}"),
            })?
            .claims;

        let revoked = match &claims.session_id {
            Some(session_id) => self.revoked()?.contains(session_id),
            None => false,
        };
        if revoked {
            return Err(ProviderError::Rejected {
                status: 403,
                message: "Session not found".to_string(),
            });
        }

        Ok(claims)
    }
}

#[async_trait::async_trait]
impl AuthProvider for MockAuthProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<ProviderSession, ProviderError> {
        let account = self
            .accounts()?
            .get(&credentials.email)
            .filter(|a| a.password == credentials.password)
            .cloned()
            .ok_or_else(|| ProviderError::Rejected {
                status: 400,
                message: "Invalid login credentials".to_string(),
            })?;

        tracing::debug!(email = %credentials.email, "Mock provider: sign-in");
        self.issue_session(&account.id, &credentials.email)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<ProviderSession, ProviderError> {
        let id = {
            let mut accounts = self.accounts()?;
            if accounts.contains_key(&credentials.email) {
                return Err(ProviderError::Rejected {
                    status: 422,
                    message: "User already registered".to_string(),
                });
            }
            let id = Uuid::new_v4().to_string();
            accounts.insert(
                credentials.email.clone(),
                MockAccount {
                    id: id.clone(),
                    password: credentials.password.clone(),
                },
            );
            id
        };

        tracing::debug!(email = %credentials.email, "Mock provider: sign-up");
        self.issue_session(&id, &credentials.email)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        let claims = self.verify(access_token)?;
        if let Some(session_id) = claims.session_id {
            self.revoked()?.insert(session_id);
        }
        tracing::debug!(sub = %claims.sub, "Mock provider: sign-out");
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<ProviderUser, ProviderError> {
        let claims = self.verify(access_token)?;
        Ok(ProviderUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}
