//! Credential validation
//!
//! Drives one sign-in or sign-up attempt through the provider and the user
//! store and returns the provider's raw session token with the local record.
//! Which provider call and which store call to make is the caller's choice.

use std::fmt::Display;
use std::future::Future;

use crate::error::{AuthError, FailureReason};
use crate::provider::{ProviderError, ProviderSession, ProviderUser};
use crate::types::Credentials;

/// Optional final gate on the resolved record
pub type Predicate<'a, U> = &'a (dyn Fn(&U) -> bool + Send + Sync);

/// A provider identity that carries the email the store is keyed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub provider_id: String,
    pub email: String,
}

/// Validate credentials end to end.
///
/// A provider success followed by a store failure never reports success.
pub async fn validate<U, A, AFut, L, LFut, E>(
    credentials: Credentials,
    authenticate: A,
    lookup_or_create: L,
    predicate: Option<Predicate<'_, U>>,
) -> Result<(String, U), AuthError>
where
    A: FnOnce(Credentials) -> AFut,
    AFut: Future<Output = Result<ProviderSession, ProviderError>>,
    L: FnOnce(VerifiedIdentity) -> LFut,
    LFut: Future<Output = Result<Option<U>, E>>,
    E: Display,
{
    let email = credentials.email.clone();

    let session = authenticate(credentials).await.map_err(|e| {
        tracing::info!(email = %email, error = %e, "Provider refused credentials");
        AuthError::failure_with(FailureReason::Rejected, e.public_message())
    })?;

    let (identity, access_token) = match session {
        ProviderSession {
            user:
                Some(ProviderUser {
                    id,
                    email: Some(email),
                }),
            access_token: Some(token),
        } if !email.is_empty() && !token.is_empty() => (
            VerifiedIdentity {
                provider_id: id,
                email,
            },
            token,
        ),
        _ => {
            tracing::info!(email = %email, "Provider returned no usable session");
            return Err(AuthError::failure(FailureReason::NoSession));
        }
    };

    let record = lookup_or_create(identity.clone()).await.map_err(|e| {
        tracing::error!(
            email = %identity.email,
            provider_id = %identity.provider_id,
            error = %e,
            "User store failed after provider accepted credentials"
        );
        AuthError::failure_with(FailureReason::Store, e)
    })?;

    let Some(record) = record else {
        tracing::info!(email = %identity.email, "No local user for provider identity");
        return Err(AuthError::failure(FailureReason::UserNotFound));
    };

    if let Some(allowed) = predicate {
        if !allowed(&record) {
            tracing::info!(email = %identity.email, "Predicate refused user");
            return Err(AuthError::failure(FailureReason::NotAllowed));
        }
    }

    tracing::debug!(email = %identity.email, "Credentials validated");
    Ok((access_token, record))
}
