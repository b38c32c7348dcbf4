//! Repository for the `courses` table.

use sqlx::PgPool;

use crate::models::course::Course;

const COLUMNS: &str = "id, name, slug, description, icon, color, created_at";

/// Read-only access to the course catalog.
pub struct CourseRepo;

impl CourseRepo {
    /// List every course, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, Course>(&query).fetch_all(pool).await
    }

    /// Find a course by its unique slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE slug = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }
}
