//! Avatar derivation for profile summaries.

use serde::Serialize;

/// Maximum number of initials shown in an avatar.
const MAX_INITIALS: usize = 2;

/// What a profile avatar renders: initials, or the generic person icon when
/// no usable name is on record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Avatar {
    Initials { value: String },
    PersonIcon,
}

impl Avatar {
    pub fn from_full_name(full_name: Option<&str>) -> Self {
        match initials(full_name) {
            Some(value) => Avatar::Initials { value },
            None => Avatar::PersonIcon,
        }
    }
}

/// First letter of each whitespace-separated word, uppercased, at most two.
///
/// Returns `None` for an absent or blank name.
pub fn initials(full_name: Option<&str>) -> Option<String> {
    let value: String = full_name?
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(MAX_INITIALS)
        .collect();

    (!value.is_empty()).then_some(value)
}
