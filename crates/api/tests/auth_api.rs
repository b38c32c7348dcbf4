//! HTTP-level integration tests for the credential entry endpoints.
//!
//! Cover sign-up, sign-in, refresh rotation and sign-out, including the
//! exact failure messages a client shows.

mod common;

use std::sync::Arc;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{body_json, get_auth, post_auth, post_json, sign_up, signed_in_user, TEST_PASSWORD};
use portal_db::store::memory::{MemoryStore, StoreOp};

fn app(store: &Arc<MemoryStore>) -> axum::Router {
    common::build_test_app(Arc::clone(store))
}

// ---------------------------------------------------------------------------
// Sign-up
// ---------------------------------------------------------------------------

/// A new account gets a session, a success notice and a catalog redirect.
#[tokio::test]
async fn test_sign_up_success() {
    let store = Arc::new(MemoryStore::seeded());

    let body = serde_json::json!({
        "email": "Ada@Example.com",
        "password": TEST_PASSWORD,
        "full_name": "Ada Lovelace",
    });
    let response = post_json(app(&store), "/api/v1/auth/sign-up", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("sign-up must set the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("portal_session="));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert!(json["data"]["access_token"].is_string());
    assert!(json["data"]["refresh_token"].is_string());
    assert_eq!(json["data"]["token_type"], "bearer");
    assert_eq!(json["data"]["expires_in"], 15 * 60);
    assert_eq!(json["data"]["user"]["email"], "ada@example.com");
    assert_eq!(json["notice"]["level"], "success");
    assert_eq!(json["notice"]["message"], "Account created!");
    assert_eq!(json["redirect"], "/courses");
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let store = Arc::new(MemoryStore::seeded());
    sign_up(app(&store), "dup@example.com", None).await;

    let body = serde_json::json!({ "email": "DUP@example.com", "password": TEST_PASSWORD });
    let response = post_json(app(&store), "/api/v1/auth/sign-up", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "User already registered");
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn test_sign_up_short_password() {
    let store = Arc::new(MemoryStore::seeded());

    let body = serde_json::json!({ "email": "short@example.com", "password": "12345" });
    let response = post_json(app(&store), "/api/v1/auth/sign-up", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Password should be at least 6 characters");
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_sign_up_malformed_email() {
    let store = Arc::new(MemoryStore::seeded());

    let body = serde_json::json!({ "email": "not-an-email", "password": TEST_PASSWORD });
    let response = post_json(app(&store), "/api/v1/auth/sign-up", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// A store failure other than the email constraint is not reported as a
/// duplicate.
#[tokio::test]
async fn test_sign_up_store_failure_is_internal() {
    let store = Arc::new(MemoryStore::seeded());
    store.fail_on(StoreOp::CreateAccount);

    let body = serde_json::json!({ "email": "x@example.com", "password": TEST_PASSWORD });
    let response = post_json(app(&store), "/api/v1/auth/sign-up", body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

// ---------------------------------------------------------------------------
// Sign-in
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_sign_in_success() {
    let store = Arc::new(MemoryStore::seeded());
    let (user_id, _) = signed_in_user(app(&store), "grace@example.com", Some("Grace Hopper")).await;

    let body = serde_json::json!({ "email": " Grace@example.com ", "password": TEST_PASSWORD });
    let response = post_json(app(&store), "/api/v1/auth/sign-in", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_some());
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["id"], user_id);
    assert_eq!(json["notice"]["message"], "Welcome back!");
    assert_eq!(json["redirect"], "/courses");
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let store = Arc::new(MemoryStore::seeded());
    sign_up(app(&store), "wrongpw@example.com", None).await;

    let body = serde_json::json!({ "email": "wrongpw@example.com", "password": "incorrect" });
    let response = post_json(app(&store), "/api/v1/auth/sign-in", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid login credentials");
    assert!(json.get("redirect").is_none());
}

#[tokio::test]
async fn test_sign_in_unknown_email() {
    let store = Arc::new(MemoryStore::seeded());

    let body = serde_json::json!({ "email": "ghost@example.com", "password": "whatever" });
    let response = post_json(app(&store), "/api/v1/auth/sign-in", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid login credentials");
}

/// A body the JSON extractor rejects gets the standard error envelope.
#[tokio::test]
async fn test_sign_in_missing_field_is_bad_request() {
    let store = Arc::new(MemoryStore::seeded());

    let body = serde_json::json!({ "email": "nopw@example.com" });
    let response = post_json(app(&store), "/api/v1/auth/sign-in", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_sign_up_wrong_field_type_is_bad_request() {
    let store = Arc::new(MemoryStore::seeded());

    let body = serde_json::json!({ "email": "typed@example.com", "password": 123456 });
    let response = post_json(app(&store), "/api/v1/auth/sign-up", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

/// A refresh token works exactly once.
#[tokio::test]
async fn test_refresh_rotates_token() {
    let store = Arc::new(MemoryStore::seeded());
    let signed_up = sign_up(app(&store), "rotate@example.com", None).await;
    let old_access = signed_up["data"]["access_token"].as_str().unwrap().to_string();
    let refresh_token = signed_up["data"]["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app(&store), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let new_access = json["data"]["access_token"].as_str().unwrap().to_string();
    assert_ne!(json["data"]["refresh_token"], refresh_token);

    // The new session is usable and the old one is gone.
    let response = get_auth(app(&store), "/api/v1/session", &new_access).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_auth(app(&store), "/api/v1/session", &old_access).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Replaying the old refresh token fails.
    let response = post_json(app(&store), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_unknown_token() {
    let store = Arc::new(MemoryStore::seeded());

    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app(&store), "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired refresh token");
}

/// A refresh for an account whose profile is gone fails without ending the
/// session it was presented for.
#[tokio::test]
async fn test_refresh_missing_profile_keeps_session() {
    let store = Arc::new(MemoryStore::seeded());
    let signed_up = sign_up(app(&store), "orphan@example.com", None).await;
    let user_id = signed_up["data"]["user"]["id"].as_i64().unwrap();
    let access = signed_up["data"]["access_token"].as_str().unwrap().to_string();
    let refresh_token = signed_up["data"]["refresh_token"].as_str().unwrap().to_string();
    assert!(store.remove_profile(user_id).await);

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app(&store), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "User no longer exists");

    let response = get_auth(app(&store), "/api/v1/session", &access).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The refresh token was not consumed either.
    let response = post_json(app(&store), "/api/v1/auth/refresh", body).await;
    assert_eq!(body_json(response).await["error"], "User no longer exists");
}

/// A profile lookup failure during refresh leaves the session usable.
#[tokio::test]
async fn test_refresh_profile_failure_keeps_session() {
    let store = Arc::new(MemoryStore::seeded());
    let signed_up = sign_up(app(&store), "flaky@example.com", None).await;
    let access = signed_up["data"]["access_token"].as_str().unwrap().to_string();
    let refresh_token = signed_up["data"]["refresh_token"].as_str().unwrap().to_string();
    store.fail_on(StoreOp::FindProfile);

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app(&store), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = get_auth(app(&store), "/api/v1/session", &access).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_missing_token_field_is_bad_request() {
    let store = Arc::new(MemoryStore::seeded());

    let response = post_json(app(&store), "/api/v1/auth/refresh", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Sign-out
// ---------------------------------------------------------------------------

/// Sign-out ends every session of the user by default.
#[tokio::test]
async fn test_sign_out_global() {
    let store = Arc::new(MemoryStore::seeded());
    let (_, first) = signed_in_user(app(&store), "out@example.com", None).await;

    let body = serde_json::json!({ "email": "out@example.com", "password": TEST_PASSWORD });
    let json = body_json(post_json(app(&store), "/api/v1/auth/sign-in", body).await).await;
    let second = json["data"]["access_token"].as_str().unwrap().to_string();

    let response = post_auth(app(&store), "/api/v1/auth/sign-out", &first).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));

    let json = body_json(response).await;
    assert_eq!(json["data"]["revoked_sessions"], 2);
    assert_eq!(json["notice"]["message"], "Signed out successfully");
    assert_eq!(json["redirect"], "/auth");

    for token in [&first, &second] {
        let response = get_auth(app(&store), "/api/v1/session", token).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}

#[tokio::test]
async fn test_sign_out_local_keeps_other_sessions() {
    let store = Arc::new(MemoryStore::seeded());
    let (_, first) = signed_in_user(app(&store), "local@example.com", None).await;

    let body = serde_json::json!({ "email": "local@example.com", "password": TEST_PASSWORD });
    let json = body_json(post_json(app(&store), "/api/v1/auth/sign-in", body).await).await;
    let second = json["data"]["access_token"].as_str().unwrap().to_string();

    let response = post_auth(app(&store), "/api/v1/auth/sign-out?scope=local", &first).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["revoked_sessions"], 1);

    let response = get_auth(app(&store), "/api/v1/session", &first).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let response = get_auth(app(&store), "/api/v1/session", &second).await;
    assert_eq!(response.status(), StatusCode::OK);
}
