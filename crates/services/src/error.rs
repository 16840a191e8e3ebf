//! Shared error types for the services crate.

use std::time::Duration;

use quiz_core::model::{QuestionError, QuizMode, RoleKey};
use thiserror::Error;

/// Errors from the generative question path.
///
/// Every variant is recoverable: the provider answers all of them by falling
/// back to the static table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("question generator is not configured")]
    Disabled,
    #[error("question generator returned an empty response")]
    EmptyResponse,
    #[error("question generator request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("question generator timed out after {0:?}")]
    Timeout(Duration),
    #[error("generated payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("generated payload contains no questions")]
    NoQuestions,
    #[error("generated question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// Errors emitted by `QuestionProvider`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("no questions available for role {role} ({mode} mode)")]
    Unavailable { role: RoleKey, mode: QuizMode },
}
