use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles that ship with a pre-authored fallback question set.
pub const KNOWN_ROLES: [&str; 4] = [
    "data_scientist",
    "machine_learning_engineer",
    "ai_researcher",
    "computer_vision_engineer",
];

/// Normalized role identifier used to key the fallback table.
///
/// Every whitespace character becomes `_` and the result is lowercased, so
/// "Data Scientist" and "data scientist" share the key `data_scientist`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleKey(String);

impl RoleKey {
    #[must_use]
    pub fn normalize(role: &str) -> Self {
        let key: String = role
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        Self(key.to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this key names one of [`KNOWN_ROLES`].
    #[must_use]
    pub fn is_known(&self) -> bool {
        KNOWN_ROLES.contains(&self.0.as_str())
    }

    /// Iterator over the keys of every known role.
    pub fn known() -> impl Iterator<Item = RoleKey> {
        KNOWN_ROLES.iter().map(|role| Self((*role).to_string()))
    }
}

impl fmt::Display for RoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
