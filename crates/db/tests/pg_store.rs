//! PostgreSQL adapter tests.
//!
//! These need a reachable database (`DATABASE_URL`), so they are ignored by
//! default. Run with `cargo test -p portal-db -- --ignored`.

use assert_matches::assert_matches;
use portal_db::models::account::CreateAccount;
use portal_db::models::enrollment::CreateEnrollment;
use portal_db::store::{constraints, PgStore, PortalStore, StoreError};
use sqlx::PgPool;

async fn create_account(store: &PgStore, email: &str) -> portal_db::models::account::Account {
    store
        .create_account(&CreateAccount {
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            full_name: Some("Jane Doe".to_string()),
        })
        .await
        .expect("account creation should succeed")
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn seeded_catalog_is_ordered_by_creation(pool: PgPool) {
    let store = PgStore::new(pool);
    let slugs: Vec<String> = store
        .list_courses()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.slug)
        .collect();

    let expected: Vec<String> = portal_db::seed::COURSES
        .iter()
        .map(|c| c.slug.to_string())
        .collect();
    assert_eq!(slugs, expected);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn sign_up_creates_profile_and_rejects_duplicate_email(pool: PgPool) {
    let store = PgStore::new(pool);
    let account = create_account(&store, "jane@example.com").await;

    let profile = store.find_profile(account.id).await.unwrap().unwrap();
    assert_eq!(profile.full_name.as_deref(), Some("Jane Doe"));

    let err = store
        .create_account(&CreateAccount {
            email: "jane@example.com".to_string(),
            password_hash: "x".to_string(),
            full_name: None,
        })
        .await
        .unwrap_err();
    assert!(err.violates(constraints::ACCOUNTS_EMAIL));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn duplicate_enrollment_is_classified_by_constraint(pool: PgPool) {
    let store = PgStore::new(pool);
    let account = create_account(&store, "jane@example.com").await;
    let course = store.find_course_by_slug("cpp").await.unwrap().unwrap();
    let input = CreateEnrollment {
        user_id: account.id,
        course_id: course.id,
    };

    store.create_enrollment(&input).await.unwrap();
    let err = store.create_enrollment(&input).await.unwrap_err();
    assert!(err.violates(constraints::ENROLLMENTS_USER_COURSE));

    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM enrollments WHERE user_id = $1 AND course_id = $2")
            .bind(account.id)
            .bind(course.id)
            .fetch_one(store.pool())
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn enrollment_for_missing_course_is_a_foreign_key_violation(pool: PgPool) {
    let store = PgStore::new(pool);
    let account = create_account(&store, "jane@example.com").await;

    let err = store
        .create_enrollment(&CreateEnrollment {
            user_id: account.id,
            course_id: 999_999,
        })
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::ForeignKeyViolation { .. });
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn enrollments_join_courses_most_recent_first(pool: PgPool) {
    let store = PgStore::new(pool);
    let account = create_account(&store, "jane@example.com").await;

    for (slug, minutes_ago) in [("python", 30), ("cpp", 10), ("dsa", 20)] {
        let course = store.find_course_by_slug(slug).await.unwrap().unwrap();
        sqlx::query(
            "INSERT INTO enrollments (user_id, course_id, enrolled_at)
             VALUES ($1, $2, NOW() - make_interval(mins => $3))",
        )
        .bind(account.id)
        .bind(course.id)
        .bind(minutes_ago)
        .execute(store.pool())
        .await
        .unwrap();
    }

    let slugs: Vec<String> = store
        .list_enrollments_for_user(account.id)
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.course.slug)
        .collect();
    assert_eq!(slugs, ["cpp", "dsa", "python"]);
}
