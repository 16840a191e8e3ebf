use serde::{Deserialize, Serialize};
use std::fmt;

/// Text recorded for a question the user skipped.
pub const NOT_ANSWERED: &str = "Not answered";

/// The recorded response to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Chosen(String),
    NotAnswered,
}

impl Answer {
    #[must_use]
    pub fn from_selection(selection: Option<String>) -> Self {
        selection.map_or(Self::NotAnswered, Self::Chosen)
    }

    /// Display text, with the sentinel for a skipped question.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chosen(text) => text,
            Self::NotAnswered => NOT_ANSWERED,
        }
    }

    /// Returns true only for a chosen option equal to `correct`.
    ///
    /// A skipped question never matches, even if an option is literally the
    /// sentinel text.
    #[must_use]
    pub fn matches(&self, correct: &str) -> bool {
        matches!(self, Self::Chosen(text) if text == correct)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
