//! Client view paths used as navigation and redirect targets.

/// Credential-entry (sign-in / sign-up) view.
pub const CREDENTIAL_ENTRY: &str = "/auth";
/// Course catalog view.
pub const CATALOG: &str = "/courses";
/// Personal dashboard view.
pub const DASHBOARD: &str = "/dashboard";

/// Detail view for a single course.
pub fn course_detail(slug: &str) -> String {
    format!("{CATALOG}/{slug}")
}
