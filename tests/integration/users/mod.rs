//! User endpoint integration tests
//!
//! These need a migrated Postgres reachable at `TEST_DATABASE_URL`.

use artcafe_auth::Role;
use artcafe_users::UserRepository;
use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{
    authed_request, error_code, unauthed_request, unique_email, TestApp, UserFixture,
    TEST_PASSWORD,
};

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_register_creates_user_with_zero_score() {
    let app = TestApp::with_database().await.unwrap();
    let email = unique_email("register");

    let (status, body) = app
        .send(unauthed_request(
            Method::POST,
            "/api/register",
            Some(json!({
                "email": email,
                "password": TEST_PASSWORD,
                "name": "New Person",
                "role": "User",
            })),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();

    let snapshot = app.codec.embedded_user(token).unwrap();
    assert_eq!(snapshot.email, email);
    assert_eq!(snapshot.role, Role::User);
    assert_eq!(snapshot.score, 0);

    let stored = UserRepository::new(app.pool.clone())
        .find(snapshot.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.email, email);
    assert_eq!(stored.name, "New Person");

    // The enriched token authenticates straight away
    let (status, body) = app
        .send(authed_request(
            Method::GET,
            &format!("/api/users/{}", snapshot.id),
            token,
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], email);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_register_twice_is_rejected_by_provider() {
    let app = TestApp::with_database().await.unwrap();
    let email = unique_email("twice");
    let body = json!({ "email": email, "password": TEST_PASSWORD, "name": "Twice", "role": "Creator" });

    let (status, _) = app
        .send(unauthed_request(Method::POST, "/api/register", Some(body.clone())))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(unauthed_request(Method::POST, "/api/register", Some(body)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("User already registered"));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_login_returns_current_snapshot() {
    let app = TestApp::with_database().await.unwrap();
    let fixture = UserFixture::creator(&app).await.unwrap();

    let (status, body) = app
        .send(unauthed_request(
            Method::POST,
            "/api/login",
            Some(json!({ "email": fixture.user.email, "password": TEST_PASSWORD })),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    let snapshot = app
        .codec
        .embedded_user(body["token"].as_str().unwrap())
        .unwrap();
    assert_eq!(snapshot.id, fixture.user.id);
    assert_eq!(snapshot.role, Role::Creator);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_login_without_local_record_is_user_not_found() {
    let app = TestApp::with_database().await.unwrap();
    let email = unique_email("orphan");
    app.provider.with_account(&email, TEST_PASSWORD);

    let (status, body) = app
        .send(unauthed_request(
            Method::POST,
            "/api/login",
            Some(json!({ "email": email, "password": TEST_PASSWORD })),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "AUTH_FAILURE");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("user not found"));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_user_access_is_self_or_admin() {
    let app = TestApp::with_database().await.unwrap();
    let alice = UserFixture::user(&app).await.unwrap();
    let bob = UserFixture::user(&app).await.unwrap();
    let admin = UserFixture::admin(&app).await.unwrap();

    let alice_uri = format!("/api/users/{}", alice.user.id);

    let (status, _) = app
        .send(authed_request(Method::GET, &alice_uri, &alice.token, None))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(authed_request(Method::GET, &alice_uri, &bob.token, None))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "FORBIDDEN");

    let (status, body) = app
        .send(authed_request(Method::GET, &alice_uri, &admin.token, None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], alice.user.id.to_string());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_role_read_from_store_not_token() {
    let app = TestApp::with_database().await.unwrap();
    let alice = UserFixture::user(&app).await.unwrap();
    let target = UserFixture::user(&app).await.unwrap();

    // A token claiming Admin only changes the snapshot, never the stored role
    let forged_snapshot = artcafe_auth::AuthIdentity {
        role: Role::Admin,
        ..artcafe_auth::AuthIdentity::from(alice.user.clone())
    };
    let token = app.enriched_token(&forged_snapshot).await;

    let (status, _) = app
        .send(authed_request(
            Method::GET,
            &format!("/api/users/{}", target.user.id),
            &token,
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_self_update_name_only() {
    let app = TestApp::with_database().await.unwrap();
    let alice = UserFixture::user(&app).await.unwrap();
    let uri = format!("/api/users/{}", alice.user.id);

    let (status, body) = app
        .send(authed_request(
            Method::PATCH,
            &uri,
            &alice.token,
            Some(json!({ "name": "Alice Renamed" })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice Renamed");
    assert_eq!(body["role"], "User");

    let (status, _) = app
        .send(authed_request(
            Method::PATCH,
            &uri,
            &alice.token,
            Some(json!({ "role": "Admin" })),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(authed_request(
            Method::PATCH,
            &uri,
            &alice.token,
            Some(json!({ "score": 1000 })),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(authed_request(Method::PATCH, &uri, &alice.token, Some(json!({}))))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_admin_sets_role_and_score() {
    let app = TestApp::with_database().await.unwrap();
    let alice = UserFixture::user(&app).await.unwrap();
    let admin = UserFixture::admin(&app).await.unwrap();

    let (status, body) = app
        .send(authed_request(
            Method::PATCH,
            &format!("/api/users/{}", alice.user.id),
            &admin.token,
            Some(json!({ "role": "Creator", "score": 42 })),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "Creator");
    assert_eq!(body["score"], 42);
    assert_eq!(body["name"], alice.user.name);

    // Alice's old token still authenticates and now resolves the new role
    let (status, body) = app
        .send(authed_request(
            Method::GET,
            &format!("/api/users/accounts/{}", alice.user.email),
            &alice.token,
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "Creator");
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_new_creators_lists_creators_only() {
    let app = TestApp::with_database().await.unwrap();
    let creator = UserFixture::creator(&app).await.unwrap();
    let plain = UserFixture::user(&app).await.unwrap();

    let (status, body) = app
        .send(authed_request(
            Method::GET,
            "/api/users/new_creators?limit=100",
            &plain.token,
            None,
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert!(listed.iter().all(|u| u["role"] == "Creator"));
    assert!(listed
        .iter()
        .any(|u| u["id"] == creator.user.id.to_string()));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_unknown_email_is_not_found() {
    let app = TestApp::with_database().await.unwrap();
    let alice = UserFixture::user(&app).await.unwrap();

    let (status, body) = app
        .send(authed_request(
            Method::GET,
            &format!("/api/users/accounts/{}", unique_email("ghost")),
            &alice.token,
            None,
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_delete_returns_record_and_token_stops_working() {
    let app = TestApp::with_database().await.unwrap();
    let alice = UserFixture::user(&app).await.unwrap();
    let uri = format!("/api/users/{}", alice.user.id);

    let (status, body) = app
        .send(authed_request(Method::DELETE, &uri, &alice.token, None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], alice.user.id.to_string());
    assert_eq!(body["email"], alice.user.email);

    let (status, _) = app
        .send(authed_request(Method::GET, &uri, &alice.token, None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_logout_revokes_session() {
    let app = TestApp::with_database().await.unwrap();
    let alice = UserFixture::user(&app).await.unwrap();

    let (status, body) = app
        .send(authed_request(Method::POST, "/api/logout", &alice.token, None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logout successful");
    assert_eq!(app.provider.revoked_count(), 1);

    let (status, body) = app
        .send(authed_request(
            Method::GET,
            &format!("/api/users/{}", alice.user.id),
            &alice.token,
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "AUTH_FAILURE");

    // A fresh sign-in still works
    let (status, _) = app
        .send(unauthed_request(
            Method::POST,
            "/api/login",
            Some(json!({ "email": alice.user.email, "password": TEST_PASSWORD })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
}
