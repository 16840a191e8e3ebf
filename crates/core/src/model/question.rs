use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of options every multiple-choice question carries.
pub const OPTION_COUNT: usize = 4;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// The wire shape is `{ question, options, answer, difficulty }`. Deserialization
/// goes through [`QuestionDraft`] so a record that breaks the invariants can never
/// be observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionDraft")]
pub struct QuestionRecord {
    question: String,
    options: Vec<String>,
    answer: String,
    difficulty: String,
}

impl QuestionRecord {
    /// Build a validated question record.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, the option count is not
    /// [`OPTION_COUNT`], or the answer is not one of the options.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        QuestionDraft {
            question: question.into(),
            options,
            answer: answer.into(),
            difficulty: Some(difficulty.into()),
        }
        .validate()
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    /// Case-insensitive difficulty comparison.
    #[must_use]
    pub fn has_difficulty(&self, difficulty: &str) -> bool {
        self.difficulty.to_lowercase() == difficulty.to_lowercase()
    }

    /// Returns true when `choice` is exactly the correct answer.
    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        self.answer == choice
    }
}

/// Unvalidated question as it arrives from a file or a model response.
///
/// `difficulty` is optional because generated payloads frequently omit it; see
/// [`QuestionDraft::validate_with_default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl QuestionDraft {
    /// Validate a draft that must carry its own difficulty.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when any record invariant fails.
    pub fn validate(self) -> Result<QuestionRecord, QuestionError> {
        self.validate_with_default(None)
    }

    /// Validate a draft, filling a missing difficulty with `fallback`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when any record invariant fails, or when neither
    /// the draft nor `fallback` provides a difficulty.
    pub fn validate_with_default(
        self,
        fallback: Option<&str>,
    ) -> Result<QuestionRecord, QuestionError> {
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyQuestion);
        }
        if self.options.len() != OPTION_COUNT {
            return Err(QuestionError::OptionCount {
                expected: OPTION_COUNT,
                found: self.options.len(),
            });
        }
        if !self.options.iter().any(|option| option == &self.answer) {
            return Err(QuestionError::AnswerNotInOptions {
                answer: self.answer,
            });
        }
        let difficulty = self
            .difficulty
            .filter(|d| !d.trim().is_empty())
            .or_else(|| fallback.map(str::to_owned))
            .ok_or(QuestionError::MissingDifficulty)?;

        Ok(QuestionRecord {
            question: self.question,
            options: self.options,
            answer: self.answer,
            difficulty,
        })
    }
}

impl TryFrom<QuestionDraft> for QuestionRecord {
    type Error = QuestionError;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyQuestion,

    #[error("expected {expected} options, found {found}")]
    OptionCount { expected: usize, found: usize },

    #[error("answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },

    #[error("question has no difficulty")]
    MissingDifficulty,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
