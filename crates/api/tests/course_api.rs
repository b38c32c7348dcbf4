//! Integration tests for course detail and enrollment.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use common::{body_json, get_auth, post_auth, signed_in_user};
use portal_core::resources::CURATED_SLUGS;
use portal_db::seed::SeedCourse;
use portal_db::store::memory::{MemoryStore, StoreOp};
use portal_db::store::PortalStore;

async fn setup() -> (Arc<MemoryStore>, axum::Router, i64, String) {
    let store = Arc::new(MemoryStore::seeded());
    let app = common::build_test_app(Arc::clone(&store));
    let (user_id, token) = signed_in_user(app.clone(), "learner@example.com", None).await;
    (store, app, user_id, token)
}

async fn course_id(store: &MemoryStore, slug: &str) -> i64 {
    store.find_course_by_slug(slug).await.unwrap().unwrap().id
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_course_detail_with_resources() {
    let (_store, app, _, token) = setup().await;

    let response = get_auth(app, "/api/v1/courses/cpp", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "C++");
    assert_eq!(json["data"]["icon"], "cpu");
    let resources = json["data"]["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 3);
    assert_eq!(resources[0]["title"], "LearnCpp.com");
    assert_eq!(resources[0]["url"], "https://www.learncpp.com/");
    assert_eq!(resources[0]["description"], "Free comprehensive C++ tutorial");
    for resource in resources {
        assert!(resource["url"].as_str().unwrap().starts_with("https://"));
    }
}

/// Every seeded course has curated resources on its detail view.
#[tokio::test]
async fn test_every_seeded_course_has_resources() {
    let (_store, app, _, token) = setup().await;

    for slug in CURATED_SLUGS {
        let response = get_auth(app.clone(), &format!("/api/v1/courses/{slug}"), &token).await;
        assert_eq!(response.status(), StatusCode::OK, "{slug}");
        let json = body_json(response).await;
        assert_eq!(json["data"]["resources"].as_array().unwrap().len(), 3, "{slug}");
    }
}

/// A course with no curated resources still renders, with an empty list.
#[tokio::test]
async fn test_course_detail_without_resources() {
    let (store, app, _, token) = setup().await;
    store
        .add_course(
            &SeedCourse {
                name: "Go",
                slug: "go",
                description: "Simple, concurrent, compiled.",
                icon: None,
                color: None,
            },
            Utc::now(),
        )
        .await
        .unwrap();

    let response = get_auth(app, "/api/v1/courses/go", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "go");
    assert_eq!(json["data"]["color"], "from-primary to-primary-dark");
    assert_eq!(json["data"]["resources"], serde_json::json!([]));
}

#[tokio::test]
async fn test_course_detail_unknown_slug() {
    let (_store, app, _, token) = setup().await;

    let response = get_auth(app, "/api/v1/courses/cobol", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Course not found");
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["redirect"], "/courses");
}

/// A lookup failure is reported exactly like a missing course.
#[tokio::test]
async fn test_course_detail_lookup_failure() {
    let (store, app, _, token) = setup().await;
    store.fail_on(StoreOp::FindCourse);

    let response = get_auth(app, "/api/v1/courses/cpp", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["redirect"], "/courses");
}

// ---------------------------------------------------------------------------
// Enroll
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_enroll_new_course() {
    let (store, app, user_id, token) = setup().await;
    let course_id = course_id(&store, "python").await;

    let response = post_auth(app, "/api/v1/courses/python/enroll", &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "enrolled");
    assert_eq!(json["data"]["course_id"], course_id);
    assert!(json["data"]["enrollment_id"].is_i64());
    assert_eq!(json["notice"]["level"], "success");
    assert_eq!(json["notice"]["message"], "Successfully enrolled in Python!");

    assert_eq!(store.enrollment_count(user_id, course_id).await, 1);
}

/// Enrolling twice is reported as informational and writes nothing.
#[tokio::test]
async fn test_enroll_duplicate() {
    let (store, app, user_id, token) = setup().await;
    let course_id = course_id(&store, "dsa").await;

    let first = post_auth(app.clone(), "/api/v1/courses/dsa/enroll", &token).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_auth(app, "/api/v1/courses/dsa/enroll", &token).await;
    assert_eq!(second.status(), StatusCode::OK);

    let json = body_json(second).await;
    assert_eq!(json["data"]["status"], "already_enrolled");
    assert!(json["data"].get("enrollment_id").is_none());
    assert_eq!(json["notice"]["level"], "info");
    assert_eq!(json["notice"]["message"], "You are already enrolled in this course");

    assert_eq!(store.enrollment_count(user_id, course_id).await, 1);
}

/// Concurrent enrolls for the same pair produce exactly one row.
#[tokio::test]
async fn test_enroll_concurrent_requests() {
    let (store, app, user_id, token) = setup().await;
    let course_id = course_id(&store, "react").await;

    let requests = (0..6).map(|_| post_auth(app.clone(), "/api/v1/courses/react/enroll", &token));
    let responses = futures::future::join_all(requests).await;

    let created = responses
        .iter()
        .filter(|r| r.status() == StatusCode::CREATED)
        .count();
    let already = responses
        .iter()
        .filter(|r| r.status() == StatusCode::OK)
        .count();
    assert_eq!(created, 1);
    assert_eq!(already, 5);
    assert_eq!(store.enrollment_count(user_id, course_id).await, 1);
}

/// Any failure other than the uniqueness rule gets the fixed message.
#[tokio::test]
async fn test_enroll_failure() {
    let (store, app, user_id, token) = setup().await;
    let course_id = course_id(&store, "java").await;
    store.fail_on(StoreOp::CreateEnrollment);

    let response = post_auth(app, "/api/v1/courses/java/enroll", &token).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to enroll. Please try again.");
    assert_eq!(json["code"], "ENROLL_FAILED");
    assert_eq!(store.enrollment_count(user_id, course_id).await, 0);
}

#[tokio::test]
async fn test_enroll_unknown_course() {
    let (_store, app, _, token) = setup().await;

    let response = post_auth(app, "/api/v1/courses/cobol/enroll", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Course not found");
}
