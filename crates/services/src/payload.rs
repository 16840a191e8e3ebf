//! Prompting and parsing for generated question sets.

use quiz_core::model::{QuestionDraft, QuestionRecord};
use quiz_core::selection::QUIZ_LENGTH;
use serde::Deserialize;

use crate::error::GenerationError;

#[derive(Debug, Deserialize)]
struct GeneratedPayload {
    questions: Vec<QuestionDraft>,
}

/// Prompt asking the model for one quiz worth of questions.
#[must_use]
pub fn question_prompt(role: &str, difficulty: &str) -> String {
    format!(
        "Generate {QUIZ_LENGTH} multiple-choice questions for \"{role}\" of \"{difficulty}\" difficulty. \
         Output a JSON object with key \"questions\", each with \"question\", \"options\" (array of 4), \"answer\"."
    )
}

/// Remove Markdown code-fence markers around a model response.
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    for opener in ["```json\r\n", "```json\n", "```json", "```"] {
        if let Some(rest) = text.strip_prefix(opener) {
            text = rest;
            break;
        }
    }
    text.strip_suffix("```").unwrap_or(text).trim()
}

/// Parse and validate a generated question set.
///
/// Records without a difficulty inherit `difficulty`. More than
/// [`QUIZ_LENGTH`] records are cut down to the first [`QUIZ_LENGTH`].
///
/// # Errors
///
/// Returns `GenerationError::Parse` for malformed JSON,
/// `GenerationError::NoQuestions` for an empty list and
/// `GenerationError::InvalidQuestion` for the first record that breaks a
/// question invariant.
pub fn parse_questions(raw: &str, difficulty: &str) -> Result<Vec<QuestionRecord>, GenerationError> {
    let payload: GeneratedPayload = serde_json::from_str(strip_code_fences(raw))?;
    if payload.questions.is_empty() {
        return Err(GenerationError::NoQuestions);
    }

    payload
        .questions
        .into_iter()
        .take(QUIZ_LENGTH)
        .enumerate()
        .map(|(index, draft)| {
            draft
                .validate_with_default(Some(difficulty))
                .map_err(|source| GenerationError::InvalidQuestion { index, source })
        })
        .collect()
}
