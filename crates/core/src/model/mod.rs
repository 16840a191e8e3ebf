mod answer;
mod ids;
mod intake;
mod mode;
mod question;
mod report;
mod role;

pub use answer::{Answer, NOT_ANSWERED};
pub use ids::CertificateId;
pub use intake::{Intake, IntakeError};
pub use mode::QuizMode;
pub use question::{OPTION_COUNT, QuestionDraft, QuestionError, QuestionRecord};
pub use report::{Certificate, ReviewItem, ScoreReport, score};
pub use role::{KNOWN_ROLES, RoleKey};
