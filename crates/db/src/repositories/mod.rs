//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod course_repo;
pub mod enrollment_repo;
pub mod profile_repo;
pub mod session_repo;

pub use account_repo::AccountRepo;
pub use course_repo::CourseRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
