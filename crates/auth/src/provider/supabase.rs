//! Supabase GoTrue client
//!
//! Talks to the GoTrue REST API under `{SUPABASE_URL}/auth/v1`. Every call
//! carries the project's anon key in the `apikey` header; session-scoped calls
//! add the bare session token as a bearer credential.

use serde_json::{json, Value};

use crate::provider::{AuthProvider, ProviderError, ProviderSession, ProviderUser};
use crate::types::Credentials;

/// Supabase auth provider
pub struct SupabaseAuthProvider {
    http: reqwest::Client,
    auth_url: String,
    anon_key: String,
}

impl std::fmt::Debug for SupabaseAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAuthProvider")
            .field("auth_url", &self.auth_url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

impl SupabaseAuthProvider {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, ProviderError> {
        let url = url.into();
        reqwest::Url::parse(&url)
            .map_err(|e| ProviderError::Configuration(format!("invalid SUPABASE_URL: {}", e)))?;

        Ok(Self {
            http: reqwest::Client::new(),
            auth_url: format!("{}/auth/v1", url.trim_end_matches('/')),
            anon_key: anon_key.into(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.auth_url, path))
            .header("apikey", &self.anon_key)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ProviderError> {
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Response(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = %status, "GoTrue refused request");
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| status.to_string()),
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::Response(format!("GoTrue returned invalid JSON: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl AuthProvider for SupabaseAuthProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<ProviderSession, ProviderError> {
        let body = self
            .send(
                self.request(reqwest::Method::POST, "/token?grant_type=password")
                    .json(&json!({
                        "email": credentials.email,
                        "password": credentials.password,
                    })),
            )
            .await?;

        Ok(parse_session(&body))
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<ProviderSession, ProviderError> {
        let body = self
            .send(
                self.request(reqwest::Method::POST, "/signup").json(&json!({
                    "email": credentials.email,
                    "password": credentials.password,
                })),
            )
            .await?;

        Ok(parse_session(&body))
    }

    /// Revokes only the presented session; GoTrue's default scope is global.
    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        self.send(
            self.request(reqwest::Method::POST, "/logout?scope=local")
                .bearer_auth(access_token),
        )
        .await?;

        tracing::debug!("GoTrue session revoked");
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<ProviderUser, ProviderError> {
        let body = self
            .send(
                self.request(reqwest::Method::GET, "/user")
                    .bearer_auth(access_token),
            )
            .await?;

        parse_user(&body)
            .ok_or_else(|| ProviderError::Response("GoTrue user response has no id".to_string()))
    }
}

/// Read a session from any of the shapes GoTrue has returned.
///
/// Current releases put `access_token` and `user` at the top level; older
/// ones nest them under `session`. A sign-up awaiting email confirmation
/// returns the bare user object.
fn parse_session(body: &Value) -> ProviderSession {
    let nested = body.get("session").filter(|s| s.is_object());

    let access_token = body
        .get("access_token")
        .or_else(|| nested.and_then(|s| s.get("access_token")))
        .and_then(Value::as_str)
        .map(str::to_string);

    let user = body
        .get("user")
        .or_else(|| nested.and_then(|s| s.get("user")))
        .and_then(parse_user)
        .or_else(|| {
            if access_token.is_none() {
                parse_user(body)
            } else {
                None
            }
        });

    ProviderSession { user, access_token }
}

fn parse_user(value: &Value) -> Option<ProviderUser> {
    let id = value.get("id")?.as_str()?.to_string();
    let email = value
        .get("email")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .map(str::to_string);

    Some(ProviderUser { id, email })
}

fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
