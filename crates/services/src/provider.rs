use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{QuestionRecord, QuizMode, RoleKey};
use storage::FallbackTable;
use tracing::{info, warn};

use crate::error::{GenerationError, ProviderError};
use crate::generator::QuestionGenerator;
use crate::payload::{parse_questions, question_prompt};

/// Where a served question set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSource {
    Generated,
    Fallback,
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated => f.write_str("generated"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// A question set ready to be served.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    pub questions: Vec<QuestionRecord>,
    pub source: QuestionSource,
}

/// Answers question requests from the generator or the fallback table.
#[derive(Clone)]
pub struct QuestionProvider {
    generator: Arc<dyn QuestionGenerator>,
    fallback: Arc<FallbackTable>,
    timeout: Duration,
}

impl QuestionProvider {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    #[must_use]
    pub fn new(generator: Arc<dyn QuestionGenerator>, fallback: Arc<FallbackTable>) -> Self {
        Self {
            generator,
            fallback,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Bound each generator call; expiry counts as a generation failure.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Produce a question set for a request.
    ///
    /// `Fallback` mode reads the static table only. `Ai` mode asks the
    /// generator first and uses the table if anything about the generated set
    /// is wrong.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` when no source yields questions.
    pub async fn provide(
        &self,
        role: &str,
        difficulty: &str,
        mode: QuizMode,
    ) -> Result<QuestionSet, ProviderError> {
        let role_key = RoleKey::normalize(role);

        if mode == QuizMode::Ai {
            match self.generate(role, difficulty).await {
                Ok(questions) => {
                    info!(
                        role = %role_key,
                        count = questions.len(),
                        "serving generated questions"
                    );
                    return Ok(QuestionSet {
                        questions,
                        source: QuestionSource::Generated,
                    });
                }
                Err(err) => {
                    warn!(
                        role = %role_key,
                        error = %err,
                        "question generation failed, using fallback"
                    );
                }
            }
        }

        let questions = self.fallback.select(&role_key, difficulty);
        if questions.is_empty() {
            return Err(ProviderError::Unavailable {
                role: role_key,
                mode,
            });
        }

        info!(role = %role_key, count = questions.len(), "serving fallback questions");
        Ok(QuestionSet {
            questions,
            source: QuestionSource::Fallback,
        })
    }

    async fn generate(
        &self,
        role: &str,
        difficulty: &str,
    ) -> Result<Vec<QuestionRecord>, GenerationError> {
        let prompt = question_prompt(role, difficulty);
        let raw = tokio::time::timeout(self.timeout, self.generator.generate(&prompt))
            .await
            .map_err(|_| GenerationError::Timeout(self.timeout))??;
        parse_questions(&raw, difficulty)
    }
}
