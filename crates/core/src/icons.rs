//! Course icon and colour-gradient resolution.
//!
//! Courses store a free-form icon name and an optional gradient token. Both
//! are resolved here into a closed set of renderable values so clients never
//! look symbols up by name at runtime.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Gradient token used when a course has none (or a blank one) stored.
pub const DEFAULT_GRADIENT: &str = "from-primary to-primary-dark";

/// The closed set of icons a course card can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseIcon {
    #[default]
    BookOpen,
    Code,
    Braces,
    Terminal,
    Database,
    Server,
    Globe,
    Layers,
    Cpu,
    Cloud,
    Smartphone,
    Shield,
    Container,
    GitBranch,
}

impl CourseIcon {
    pub const ALL: [CourseIcon; 14] = [
        CourseIcon::BookOpen,
        CourseIcon::Code,
        CourseIcon::Braces,
        CourseIcon::Terminal,
        CourseIcon::Database,
        CourseIcon::Server,
        CourseIcon::Globe,
        CourseIcon::Layers,
        CourseIcon::Cpu,
        CourseIcon::Cloud,
        CourseIcon::Smartphone,
        CourseIcon::Shield,
        CourseIcon::Container,
        CourseIcon::GitBranch,
    ];

    /// Canonical kebab-case name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            CourseIcon::BookOpen => "book-open",
            CourseIcon::Code => "code",
            CourseIcon::Braces => "braces",
            CourseIcon::Terminal => "terminal",
            CourseIcon::Database => "database",
            CourseIcon::Server => "server",
            CourseIcon::Globe => "globe",
            CourseIcon::Layers => "layers",
            CourseIcon::Cpu => "cpu",
            CourseIcon::Cloud => "cloud",
            CourseIcon::Smartphone => "smartphone",
            CourseIcon::Shield => "shield",
            CourseIcon::Container => "container",
            CourseIcon::GitBranch => "git-branch",
        }
    }

    /// Resolve a stored icon name, falling back to [`CourseIcon::default`]
    /// when the name is absent or not part of the set.
    pub fn resolve(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }
}

/// Error returned when a name does not match any [`CourseIcon`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown course icon: {0}")]
pub struct UnknownIcon(pub String);

impl FromStr for CourseIcon {
    type Err = UnknownIcon;

    /// Parses `BookOpen`, `book-open`, `book_open` and `bookopen` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        CourseIcon::ALL
            .into_iter()
            .find(|icon| normalize(icon.as_str()) == wanted)
            .ok_or_else(|| UnknownIcon(s.to_string()))
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve a stored gradient token, falling back to [`DEFAULT_GRADIENT`].
pub fn resolve_gradient(token: Option<&str>) -> &str {
    match token.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_GRADIENT,
    }
}
