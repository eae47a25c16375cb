//! Bearer token extraction

use axum::{
    extract::Query,
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
};
use serde::Deserialize;

use crate::error::AuthError;

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    match header_str.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(AuthError::InvalidAuthorizationFormat),
    }
}

/// Token carried by the request: the `Authorization` header, or failing that
/// a `?token=` query parameter.
pub(crate) fn request_token(parts: &Parts) -> Result<String, AuthError> {
    if let Some(header) = parts.headers.get(AUTHORIZATION) {
        return extract_bearer_token(header);
    }

    Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(q)| q.token)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)
}
