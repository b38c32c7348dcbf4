//! Row models and insert DTOs, one module per table.

pub mod account;
pub mod course;
pub mod enrollment;
pub mod profile;
pub mod session;
