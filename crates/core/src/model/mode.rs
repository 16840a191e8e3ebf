use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a question set should come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Ask the generative model, falling back to the static table on failure.
    Ai,
    /// Serve the pre-authored table only.
    Fallback,
}

impl QuizMode {
    /// Interpret the `mode` field of a question request.
    ///
    /// Only the exact value `fallback` selects the static table; any other value
    /// takes the model path.
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        if raw == "fallback" {
            Self::Fallback
        } else {
            Self::Ai
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
