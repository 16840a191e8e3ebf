use thiserror::Error;

use crate::model::{IntakeError, QuestionError};
use crate::session::SessionError;

/// Any domain error raised by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Intake, QuestionRecord};
    use crate::session::{QuizSession, Stage};

    #[test]
    fn domain_errors_convert_transparently() {
        let question = QuestionRecord::new("", vec![], "a", "easy").unwrap_err();
        let err: Error = question.clone().into();
        assert_eq!(err.to_string(), question.to_string());

        let intake: Error = Intake::new("", "e", "r", "d").unwrap_err().into();
        assert!(matches!(intake, Error::Intake(_)));

        let session: Error = QuizSession::new().advance().unwrap_err().into();
        assert!(matches!(session, Error::Session(_)));
        assert!(session.to_string().contains(&Stage::Welcome.to_string()));
    }
}
