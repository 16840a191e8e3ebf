//! Client-side quiz session.
//!
//! The session is a linear state machine:
//!
//! ```text
//! Welcome ─► ModeSelection ─► IntakeForm ─► Generating ─► InProgress(0..n) ─► Submitted
//!    │            ▲  ▲             ▲             │                 │               │
//!    └─► About ───┘  │             └── failure ──┘                 └──── submit ───┤
//!                    │                                                              ▼
//!                    └──────────────── restart ◄──── Certificate ◄────────────── Report
//! ```
//!
//! Renderers never inspect the fields directly; they call [`QuizSession::view`]
//! and draw whatever [`SessionView`] comes back.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Clock;
use crate::model::{Answer, Certificate, Intake, QuestionRecord, QuizMode, ScoreReport};

/// Message shown on the intake form after a failed question request.
pub const RETRY_PROMPT: &str = "Failed to generate questions. Please try again.";

//
// ─── STAGES ────────────────────────────────────────────────────────────────────
//

/// The section of the quiz currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Welcome,
    About,
    ModeSelection,
    IntakeForm,
    Generating,
    InProgress { index: usize },
    Submitted,
    Report,
    Certificate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Welcome => f.write_str("welcome"),
            Stage::About => f.write_str("about"),
            Stage::ModeSelection => f.write_str("mode selection"),
            Stage::IntakeForm => f.write_str("intake form"),
            Stage::Generating => f.write_str("generating"),
            Stage::InProgress { index } => write!(f, "question {}", index + 1),
            Stage::Submitted => f.write_str("submitted"),
            Stage::Report => f.write_str("report"),
            Stage::Certificate => f.write_str("certificate"),
        }
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {action} during {stage}")]
    InvalidTransition { action: &'static str, stage: Stage },

    #[error("the question set is empty")]
    NoQuestions,

    #[error("option {index} is out of range (question has {available})")]
    OptionOutOfRange { index: usize, available: usize },
}

//
// ─── REQUEST ───────────────────────────────────────────────────────────────────
//

/// Body of the question request produced by submitting the intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub role: String,
    pub difficulty: String,
    pub mode: QuizMode,
}

//
// ─── VIEW ──────────────────────────────────────────────────────────────────────
//

/// Everything a renderer needs for the current stage.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView<'a> {
    Welcome,
    About,
    ModeSelection,
    IntakeForm {
        mode: QuizMode,
        notice: Option<&'a str>,
        previous: Option<&'a Intake>,
    },
    Generating {
        intake: &'a Intake,
    },
    Question {
        number: usize,
        total: usize,
        role: &'a str,
        difficulty: &'a str,
        question: &'a QuestionRecord,
        selected: Option<&'a str>,
    },
    Submitted {
        answered: usize,
        total: usize,
    },
    Report(&'a ScoreReport),
    Certificate(&'a Certificate),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct QuizSession {
    stage: Stage,
    mode: Option<QuizMode>,
    intake: Option<Intake>,
    questions: Vec<QuestionRecord>,
    answers: Vec<Answer>,
    selection: Option<String>,
    notice: Option<String>,
    report: Option<ScoreReport>,
    certificate: Option<Certificate>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: Stage::Welcome,
            mode: None,
            intake: None,
            questions: Vec::new(),
            answers: Vec::new(),
            selection: None,
            notice: None,
            report: None,
            certificate: None,
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn mode(&self) -> Option<QuizMode> {
        self.mode
    }

    #[must_use]
    pub fn intake(&self) -> Option<&Intake> {
        self.intake.as_ref()
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    /// Answers recorded so far, aligned with [`Self::questions`].
    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn report(&self) -> Option<&ScoreReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn certificate(&self) -> Option<&Certificate> {
        self.certificate.as_ref()
    }

    /// Leave the welcome screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Welcome`.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        self.expect("begin", |s| matches!(s, Stage::Welcome))?;
        self.stage = Stage::ModeSelection;
        Ok(())
    }

    /// Open the about page.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless on the welcome or mode screens.
    pub fn show_about(&mut self) -> Result<(), SessionError> {
        self.expect("show about", |s| {
            matches!(s, Stage::Welcome | Stage::ModeSelection)
        })?;
        self.stage = Stage::About;
        Ok(())
    }

    /// Close the about page; always lands on mode selection.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `About`.
    pub fn leave_about(&mut self) -> Result<(), SessionError> {
        self.expect("leave about", |s| matches!(s, Stage::About))?;
        self.stage = Stage::ModeSelection;
        Ok(())
    }

    /// Choose where questions come from.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `ModeSelection`.
    pub fn select_mode(&mut self, mode: QuizMode) -> Result<(), SessionError> {
        self.expect("select a mode", |s| matches!(s, Stage::ModeSelection))?;
        self.mode = Some(mode);
        self.stage = Stage::IntakeForm;
        Ok(())
    }

    /// Submit the intake form and start waiting for questions.
    ///
    /// Returns the request the caller should send to the question provider.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `IntakeForm`.
    pub fn submit_form(&mut self, intake: Intake) -> Result<QuestionRequest, SessionError> {
        self.expect("submit the form", |s| matches!(s, Stage::IntakeForm))?;
        let mode = self.mode.ok_or(SessionError::InvalidTransition {
            action: "submit the form",
            stage: self.stage,
        })?;

        let request = QuestionRequest {
            role: intake.role().to_string(),
            difficulty: intake.difficulty().to_string(),
            mode,
        };
        self.intake = Some(intake);
        self.notice = None;
        self.stage = Stage::Generating;
        Ok(request)
    }

    /// Install the question set and show the first question.
    ///
    /// An empty set is treated as a failed request: the session returns to the
    /// intake form with the retry prompt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Generating` and
    /// `SessionError::NoQuestions` for an empty set.
    pub fn questions_loaded(&mut self, questions: Vec<QuestionRecord>) -> Result<(), SessionError> {
        self.expect("load questions", |s| matches!(s, Stage::Generating))?;
        if questions.is_empty() {
            self.generation_failed()?;
            return Err(SessionError::NoQuestions);
        }

        self.answers = Vec::with_capacity(questions.len());
        self.questions = questions;
        self.selection = None;
        self.stage = Stage::InProgress { index: 0 };
        Ok(())
    }

    /// Return to the intake form after a failed request.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Generating`.
    pub fn generation_failed(&mut self) -> Result<(), SessionError> {
        self.expect("report a failed request", |s| matches!(s, Stage::Generating))?;
        self.notice = Some(RETRY_PROMPT.to_string());
        self.stage = Stage::IntakeForm;
        Ok(())
    }

    /// Select option `index` (0-based) of the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` when no question is shown and
    /// `SessionError::OptionOutOfRange` for a bad index.
    pub fn select_option(&mut self, index: usize) -> Result<(), SessionError> {
        let question = self.current_question("select an option")?;
        let available = question.options().len();
        let option = question
            .options()
            .get(index)
            .cloned()
            .ok_or(SessionError::OptionOutOfRange { index, available })?;
        self.selection = Some(option);
        Ok(())
    }

    /// Drop the selection on the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` when no question is shown.
    pub fn clear_selection(&mut self) -> Result<(), SessionError> {
        self.current_question("clear the selection")?;
        self.selection = None;
        Ok(())
    }

    /// Record the current selection (or the sentinel) and move on.
    ///
    /// After the last question the session enters `Submitted`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` when no question is shown.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        let Stage::InProgress { index } = self.stage else {
            return Err(self.invalid("advance"));
        };
        self.record_current();

        let next = index + 1;
        self.stage = if next < self.questions.len() {
            Stage::InProgress { index: next }
        } else {
            Stage::Submitted
        };
        Ok(())
    }

    /// Score the quiz and show the report.
    ///
    /// Submitting mid-quiz records the current selection and marks every
    /// remaining question as not answered.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless a quiz is in progress or
    /// fully answered.
    pub fn submit(&mut self) -> Result<&ScoreReport, SessionError> {
        match self.stage {
            Stage::InProgress { .. } => self.record_current(),
            Stage::Submitted => {}
            _ => return Err(self.invalid("submit answers")),
        }
        self.answers.resize(self.questions.len(), Answer::NotAnswered);

        let intake = self.intake.as_ref().ok_or(SessionError::InvalidTransition {
            action: "submit answers",
            stage: self.stage,
        })?;
        let report = ScoreReport::build(intake, &self.questions, &self.answers);
        self.stage = Stage::Report;
        Ok(&*self.report.insert(report))
    }

    /// Issue the certificate for the scored quiz, dated by `clock`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Report`.
    pub fn request_certificate(&mut self, clock: &Clock) -> Result<&Certificate, SessionError> {
        self.expect("issue a certificate", |s| matches!(s, Stage::Report))?;
        let report = self.report.as_ref().ok_or(SessionError::InvalidTransition {
            action: "issue a certificate",
            stage: self.stage,
        })?;
        let certificate = Certificate::issue(report, clock.today());
        self.stage = Stage::Certificate;
        Ok(&*self.certificate.insert(certificate))
    }

    /// Discard the quiz and go back to mode selection.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless on the report or
    /// certificate screens.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.expect("restart", |s| matches!(s, Stage::Report | Stage::Certificate))?;
        *self = Self {
            stage: Stage::ModeSelection,
            ..Self::new()
        };
        Ok(())
    }

    /// Project the session onto what should be drawn right now.
    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        match self.stage {
            Stage::Welcome => SessionView::Welcome,
            Stage::About => SessionView::About,
            Stage::ModeSelection => SessionView::ModeSelection,
            Stage::IntakeForm => SessionView::IntakeForm {
                mode: self.mode.unwrap_or(QuizMode::Ai),
                notice: self.notice.as_deref(),
                previous: self.intake.as_ref(),
            },
            Stage::Generating => match &self.intake {
                Some(intake) => SessionView::Generating { intake },
                None => SessionView::ModeSelection,
            },
            Stage::InProgress { index } => match (&self.intake, self.questions.get(index)) {
                (Some(intake), Some(question)) => SessionView::Question {
                    number: index + 1,
                    total: self.questions.len(),
                    role: intake.role(),
                    difficulty: intake.difficulty(),
                    question,
                    selected: self.selection.as_deref(),
                },
                _ => SessionView::ModeSelection,
            },
            Stage::Submitted => SessionView::Submitted {
                answered: self
                    .answers
                    .iter()
                    .filter(|a| !matches!(a, Answer::NotAnswered))
                    .count(),
                total: self.questions.len(),
            },
            Stage::Report => match &self.report {
                Some(report) => SessionView::Report(report),
                None => SessionView::ModeSelection,
            },
            Stage::Certificate => match &self.certificate {
                Some(certificate) => SessionView::Certificate(certificate),
                None => SessionView::ModeSelection,
            },
        }
    }

    fn record_current(&mut self) {
        let answer = Answer::from_selection(self.selection.take());
        if let Stage::InProgress { index } = self.stage {
            if index < self.answers.len() {
                self.answers[index] = answer;
            } else {
                self.answers.resize(index, Answer::NotAnswered);
                self.answers.push(answer);
            }
        }
    }

    fn current_question(&self, action: &'static str) -> Result<&QuestionRecord, SessionError> {
        match self.stage {
            Stage::InProgress { index } => self
                .questions
                .get(index)
                .ok_or(SessionError::InvalidTransition {
                    action,
                    stage: self.stage,
                }),
            _ => Err(self.invalid(action)),
        }
    }

    fn expect(
        &self,
        action: &'static str,
        allowed: impl Fn(Stage) -> bool,
    ) -> Result<(), SessionError> {
        if allowed(self.stage) {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            stage: self.stage,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_clock;

    fn questions(n: usize) -> Vec<QuestionRecord> {
        (0..n)
            .map(|i| {
                let options = ["A", "B", "C", "D"].map(String::from).to_vec();
                QuestionRecord::new(format!("Q{i}"), options, "B", "easy").unwrap()
            })
            .collect()
    }

    fn intake() -> Intake {
        Intake::new("Ada Lovelace", "ada@example.com", "Data Scientist", "easy").unwrap()
    }

    fn started(n: usize) -> QuizSession {
        let mut session = QuizSession::new();
        session.begin().unwrap();
        session.select_mode(QuizMode::Fallback).unwrap();
        session.submit_form(intake()).unwrap();
        session.questions_loaded(questions(n)).unwrap();
        session
    }

    #[test]
    fn walks_the_happy_path() {
        let mut session = QuizSession::new();
        assert_eq!(session.view(), SessionView::Welcome);

        session.begin().unwrap();
        session.select_mode(QuizMode::Ai).unwrap();
        let request = session.submit_form(intake()).unwrap();
        assert_eq!(request.role, "Data Scientist");
        assert_eq!(request.mode, QuizMode::Ai);
        assert_eq!(session.stage(), Stage::Generating);

        session.questions_loaded(questions(3)).unwrap();
        session.select_option(1).unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        session.select_option(0).unwrap();
        session.advance().unwrap();
        assert_eq!(session.stage(), Stage::Submitted);
        assert_eq!(
            session.view(),
            SessionView::Submitted {
                answered: 2,
                total: 3
            }
        );

        let report = session.submit().unwrap();
        assert_eq!(report.score, 1);
        assert_eq!(report.items[1].your_answer, "Not answered");

        let cert = session.request_certificate(&fixed_clock()).unwrap();
        assert_eq!(cert.full_name, "Ada Lovelace");
        assert_eq!(cert.issued_on.to_string(), "2023-11-14");
        assert_eq!(session.stage(), Stage::Certificate);
    }

    #[test]
    fn question_view_carries_selection() {
        let mut session = started(2);
        session.select_option(3).unwrap();
        match session.view() {
            SessionView::Question {
                number,
                total,
                selected,
                role,
                ..
            } => {
                assert_eq!((number, total), (1, 2));
                assert_eq!(selected, Some("D"));
                assert_eq!(role, "Data Scientist");
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn selection_does_not_leak_to_next_question() {
        let mut session = started(2);
        session.select_option(1).unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(
            session.answers(),
            &[Answer::Chosen("B".into()), Answer::NotAnswered]
        );
    }

    #[test]
    fn submitting_early_fills_sentinels() {
        let mut session = started(5);
        session.select_option(1).unwrap();
        let report = session.submit().unwrap();
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 5);
        assert_eq!(session.answers().len(), 5);
        assert!(session.answers()[1..]
            .iter()
            .all(|a| *a == Answer::NotAnswered));
    }

    #[test]
    fn unanswered_quiz_scores_zero() {
        let mut session = started(30);
        for _ in 0..30 {
            session.advance().unwrap();
        }
        assert_eq!(session.submit().unwrap().score, 0);
    }

    #[test]
    fn failed_request_returns_to_form_with_prompt() {
        let mut session = QuizSession::new();
        session.begin().unwrap();
        session.select_mode(QuizMode::Fallback).unwrap();
        session.submit_form(intake()).unwrap();
        session.generation_failed().unwrap();

        match session.view() {
            SessionView::IntakeForm {
                mode,
                notice,
                previous,
            } => {
                assert_eq!(mode, QuizMode::Fallback);
                assert_eq!(notice, Some(RETRY_PROMPT));
                assert_eq!(previous.map(Intake::full_name), Some("Ada Lovelace"));
            }
            other => panic!("unexpected view {other:?}"),
        }

        session.submit_form(intake()).unwrap();
        assert_eq!(
            session.questions_loaded(Vec::new()),
            Err(SessionError::NoQuestions)
        );
        assert_eq!(session.stage(), Stage::IntakeForm);
    }

    #[test]
    fn invalid_transitions_leave_state_alone() {
        let mut session = QuizSession::new();
        let err = session.submit().unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
        assert_eq!(session.stage(), Stage::Welcome);

        assert!(session.restart().is_err());
        assert!(session.select_mode(QuizMode::Ai).is_err());
        assert!(session.request_certificate(&fixed_clock()).is_err());
        assert_eq!(session.stage(), Stage::Welcome);
    }

    #[test]
    fn option_index_is_bounds_checked() {
        let mut session = started(1);
        assert_eq!(
            session.select_option(4),
            Err(SessionError::OptionOutOfRange {
                index: 4,
                available: 4
            })
        );
    }

    #[test]
    fn restart_discards_everything() {
        let mut session = started(1);
        session.submit().unwrap();
        session.restart().unwrap();

        assert_eq!(session.stage(), Stage::ModeSelection);
        assert!(session.intake().is_none());
        assert!(session.questions().is_empty());
        assert!(session.answers().is_empty());
        assert!(session.report().is_none());
        assert!(session.mode().is_none());
    }

    #[test]
    fn about_page_returns_to_mode_selection() {
        let mut session = QuizSession::new();
        session.show_about().unwrap();
        assert_eq!(session.view(), SessionView::About);
        session.leave_about().unwrap();
        assert_eq!(session.stage(), Stage::ModeSelection);
    }

    #[test]
    fn request_serializes_lowercase_mode() {
        let request = QuestionRequest {
            role: "AI Researcher".into(),
            difficulty: "hard".into(),
            mode: QuizMode::Fallback,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"role":"AI Researcher","difficulty":"hard","mode":"fallback"}"#
        );
    }
}
