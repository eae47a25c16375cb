//! Authentication integration tests
//!
//! Every request here is refused or answered before the user store is
//! reached, so these run against a lazy pool with no database.

use artcafe_auth::{AuthBackend, AuthError, AuthProvider, AuthUser, Credentials, Role, TokenIdentity};
use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Method, Request, StatusCode},
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use crate::common::{
    authed_request, detached_identity, error_code, unauthed_request, unique_email, TestApp,
    TEST_PASSWORD,
};

fn make_parts(authorization: Option<&str>, uri: &str) -> Parts {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    builder.body(()).unwrap().into_parts().0
}

#[tokio::test]
async fn test_protected_route_without_token_is_auth_failure() {
    let app = TestApp::lazy();

    let (status, body) = app
        .send(unauthed_request(Method::GET, "/api/places/recent", None))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "AUTH_FAILURE");
}

#[tokio::test]
async fn test_garbage_token_is_malformed() {
    let app = TestApp::lazy();

    let (status, body) = app
        .send(authed_request(Method::GET, "/api/places/recent", "not.a.jwt", None))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "MALFORMED_TOKEN");
}

#[tokio::test]
async fn test_bare_session_token_is_refused() {
    let app = TestApp::lazy();
    let session = app.session_token(&unique_email("bare")).await;

    let (status, body) = app
        .send(authed_request(Method::GET, "/api/places/recent", &session, None))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "MALFORMED_TOKEN");
}

#[tokio::test]
async fn test_foreign_secret_token_is_refused() {
    let app = TestApp::lazy();
    let forged = encode(
        &Header::default(),
        &json!({ "sub": "x", "exp": 4_000_000_000u64, "user": detached_identity(Role::Admin) }),
        &EncodingKey::from_secret(b"some-other-secret"),
    )
    .unwrap();

    let (status, _) = app
        .send(authed_request(Method::DELETE, &format!("/api/places/{}", uuid::Uuid::new_v4()), &forged, None))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(authed_request(Method::GET, "/api/auth/whoami", &forged, None))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "MALFORMED_TOKEN");
}

#[tokio::test]
async fn test_revoked_session_is_refused() {
    let app = TestApp::lazy();
    let identity = detached_identity(Role::User);
    let token = app.enriched_token(&identity).await;

    let bare = app.codec.strip(&token).unwrap();
    app.provider.sign_out(&bare).await.unwrap();
    assert_eq!(app.provider.revoked_count(), 1);

    let (status, body) = app
        .send(authed_request(Method::GET, "/api/places/recent", &token, None))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "AUTH_FAILURE");
}

#[tokio::test]
async fn test_whoami_returns_embedded_snapshot() {
    let app = TestApp::lazy();
    let identity = detached_identity(Role::Creator);
    let token = app.enriched_token(&identity).await;

    let (status, body) = app
        .send(authed_request(Method::GET, "/api/auth/whoami", &token, None))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], identity.id.to_string());
    assert_eq!(body["user"]["email"], identity.email);
    assert_eq!(body["user"]["role"], "Creator");
    assert_eq!(body["user"]["score"], 0);
}

#[tokio::test]
async fn test_whoami_accepts_token_query_parameter() {
    let app = TestApp::lazy();
    let identity = detached_identity(Role::User);
    let token = app.enriched_token(&identity).await;

    let (status, body) = app
        .send(unauthed_request(
            Method::GET,
            &format!("/api/auth/whoami?token={}", token),
            None,
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], identity.email);
}

#[tokio::test]
async fn test_login_with_unknown_credentials_is_rejected() {
    let app = TestApp::lazy();

    let (status, body) = app
        .send(unauthed_request(
            Method::POST,
            "/api/login",
            Some(json!({ "email": unique_email("nobody"), "password": "wrong" })),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "AUTH_FAILURE");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid login credentials"));
}

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    let app = TestApp::lazy();
    let email = unique_email("known");
    app.provider.with_account(&email, TEST_PASSWORD);

    let (status, _) = app
        .send(unauthed_request(
            Method::POST,
            "/api/login",
            Some(json!({ "email": email, "password": "not-the-password" })),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_as_admin_is_forbidden_before_provider() {
    let app = TestApp::lazy();

    let (status, body) = app
        .send(unauthed_request(
            Method::POST,
            "/api/register",
            Some(json!({
                "email": unique_email("climber"),
                "password": TEST_PASSWORD,
                "name": "Climber",
                "role": "Admin",
            })),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "FORBIDDEN");
    assert!(app.provider.registered_emails().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::lazy();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/login")
        .header("content-type", "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invalid_email_is_bad_request() {
    let app = TestApp::lazy();

    let (status, body) = app
        .send(unauthed_request(
            Method::POST,
            "/api/login",
            Some(json!({ "email": "not-an-email", "password": "pw" })),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_health_and_root() {
    let app = TestApp::lazy();

    let (status, _) = app
        .send(unauthed_request(Method::GET, "/health", None))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(unauthed_request(Method::GET, "/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("ArtCafe"));
}

#[tokio::test]
async fn test_auth_user_extractor_rejections() {
    let app = TestApp::lazy();
    let backend: AuthBackend = app.auth.clone();

    let mut parts = make_parts(None, "/api/anything");
    let err = AuthUser::from_request_parts(&mut parts, &backend)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::MissingToken));

    let mut parts = make_parts(Some("Basic dXNlcjpwdw=="), "/api/anything");
    let err = AuthUser::from_request_parts(&mut parts, &backend)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidAuthorizationFormat));

    let mut parts = make_parts(Some("Bearer garbage"), "/api/anything");
    let err = AuthUser::from_request_parts(&mut parts, &backend)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::MalformedToken(_)));
}

#[tokio::test]
async fn test_token_identity_prefers_header_over_query() {
    let app = TestApp::lazy();
    let in_header = detached_identity(Role::User);
    let in_query = detached_identity(Role::Creator);
    let header_token = app.enriched_token(&in_header).await;
    let query_token = app.enriched_token(&in_query).await;

    let mut parts = make_parts(
        Some(&format!("Bearer {}", header_token)),
        &format!("/api/auth/whoami?token={}", query_token),
    );
    let TokenIdentity(identity) = TokenIdentity::from_request_parts(&mut parts, &app.auth)
        .await
        .unwrap();

    assert_eq!(identity, in_header);
}

#[tokio::test]
async fn test_provider_accepts_stripped_enriched_token() {
    let app = TestApp::lazy();
    let email = unique_email("roundtrip");
    app.provider.with_account(&email, TEST_PASSWORD);
    let session = app
        .provider
        .sign_in(&Credentials::new(email.clone(), TEST_PASSWORD))
        .await
        .unwrap()
        .access_token
        .unwrap();

    let identity = artcafe_auth::AuthIdentity {
        email: email.clone(),
        ..detached_identity(Role::User)
    };
    let enriched = app.codec.embed(&session, &identity).unwrap();

    let user = app
        .provider
        .get_user(&app.codec.strip(&enriched).unwrap())
        .await
        .unwrap();
    assert_eq!(user.email.as_deref(), Some(email.as_str()));
}
