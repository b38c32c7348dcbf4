//! Domain building blocks for the learning portal.
//!
//! Everything here is free of I/O: identifiers, the error taxonomy, icon and
//! gradient resolution, the curated resource table, avatar initials, user
//! notices, navigation targets, and credential validation rules.

pub mod avatar;
pub mod error;
pub mod icons;
pub mod navigation;
pub mod notice;
pub mod resources;
pub mod types;
pub mod validation;
