//! Text rendering of session views and parsing of typed commands.

use std::io::{self, Write};

use quiz_core::model::{KNOWN_ROLES, QuizMode};
use quiz_core::session::{SessionView, Stage};

pub const TITLE: &str = "AI Career Path";

const ABOUT: &str = "Answer 30 multiple-choice questions tailored to an AI career role. \
Questions are generated on the fly, or drawn from a curated question bank in \
fallback mode. Finish to get a scored report and a certificate.";

/// What a line of input asks for, given the current stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Begin,
    About,
    Back,
    Mode(QuizMode),
    /// 0-based option index.
    Choose(usize),
    Next,
    Clear,
    Submit,
    Certificate,
    Download,
    Restart,
    Quit,
    Unknown(String),
}

/// Interpret `line` for `stage`.
///
/// Form entry and question generation do not read commands and always yield
/// `Unknown`.
#[must_use]
pub fn parse_action(stage: Stage, line: &str) -> Action {
    let input = line.trim().to_ascii_lowercase();
    if matches!(input.as_str(), "q" | "quit" | "exit") {
        return Action::Quit;
    }

    match stage {
        Stage::Welcome => match input.as_str() {
            "" | "s" | "start" => Action::Begin,
            "a" | "about" => Action::About,
            _ => Action::Unknown(input),
        },
        Stage::About => Action::Back,
        Stage::ModeSelection => match input.as_str() {
            "1" | "ai" => Action::Mode(QuizMode::Ai),
            "2" | "fallback" => Action::Mode(QuizMode::Fallback),
            "a" | "about" => Action::About,
            _ => Action::Unknown(input),
        },
        Stage::InProgress { .. } => match input.as_str() {
            "" | "n" | "next" => Action::Next,
            "c" | "clear" => Action::Clear,
            "s" | "submit" => Action::Submit,
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => Action::Choose(n - 1),
                _ => Action::Unknown(input),
            },
        },
        Stage::Submitted => match input.as_str() {
            "" | "s" | "submit" => Action::Submit,
            _ => Action::Unknown(input),
        },
        Stage::Report => match input.as_str() {
            "c" | "certificate" => Action::Certificate,
            "d" | "download" => Action::Download,
            "r" | "restart" => Action::Restart,
            _ => Action::Unknown(input),
        },
        Stage::Certificate => match input.as_str() {
            "d" | "download" => Action::Download,
            "r" | "restart" => Action::Restart,
            _ => Action::Unknown(input),
        },
        Stage::IntakeForm | Stage::Generating => Action::Unknown(input),
    }
}

/// Draw `view` followed by the commands valid on that screen.
///
/// # Errors
///
/// Propagates write failures.
pub fn render(view: &SessionView<'_>, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    match view {
        SessionView::Welcome => {
            writeln!(out, "=== {TITLE} ===")?;
            writeln!(out, "[enter] start   [a] about   [q] quit")?;
        }
        SessionView::About => {
            writeln!(out, "--- About ---")?;
            writeln!(out, "{ABOUT}")?;
            writeln!(out, "[enter] back")?;
        }
        SessionView::ModeSelection => {
            writeln!(out, "Choose a question source:")?;
            writeln!(out, "  1) AI generated")?;
            writeln!(out, "  2) Fallback question bank")?;
            writeln!(out, "[a] about   [q] quit")?;
        }
        SessionView::IntakeForm {
            mode,
            notice,
            previous,
        } => {
            if let Some(notice) = notice {
                writeln!(out, "! {notice}")?;
            }
            writeln!(out, "--- Your details ({mode} mode) ---")?;
            writeln!(out, "Roles: {}", KNOWN_ROLES.join(", "))?;
            if let Some(previous) = previous {
                writeln!(
                    out,
                    "Press enter on a field to keep: {} / {} / {} / {}",
                    previous.full_name(),
                    previous.email(),
                    previous.role(),
                    previous.difficulty()
                )?;
            }
        }
        SessionView::Generating { intake } => {
            writeln!(
                out,
                "Preparing {} questions for {}...",
                intake.difficulty(),
                intake.role()
            )?;
        }
        SessionView::Question {
            number,
            total,
            role,
            difficulty,
            question,
            selected,
        } => {
            writeln!(out, "[{role} | {difficulty}] Question {number} of {total}")?;
            writeln!(out, "{}", question.question())?;
            for (i, option) in question.options().iter().enumerate() {
                let marker = if Some(option.as_str()) == *selected {
                    '*'
                } else {
                    ' '
                };
                writeln!(out, " {marker}{}) {option}", i + 1)?;
            }
            writeln!(out, "[1-4] select   [enter] next   [c] clear   [s] submit")?;
        }
        SessionView::Submitted { answered, total } => {
            writeln!(out, "All questions seen ({answered} of {total} answered).")?;
            writeln!(out, "[enter] submit")?;
        }
        SessionView::Report(report) => {
            writeln!(out, "=== Assessment Report ===")?;
            writeln!(
                out,
                "{} | {} | {}",
                report.full_name, report.role, report.difficulty
            )?;
            writeln!(
                out,
                "Score: {} / {} ({}%)",
                report.score,
                report.total,
                report.percent()
            )?;
            for item in &report.items {
                let mark = if item.is_correct { "ok " } else { "xx " };
                writeln!(out, "{mark}{}. {}", item.number, item.question)?;
                writeln!(out, "     Your Answer: {}", item.your_answer)?;
                writeln!(out, "     Correct Answer: {}", item.correct_answer)?;
            }
            writeln!(out, "[c] certificate   [d] download   [r] restart   [q] quit")?;
        }
        SessionView::Certificate(certificate) => {
            writeln!(out, "=== Certificate of Completion ===")?;
            writeln!(out, "Awarded to {}", certificate.full_name)?;
            writeln!(out, "Role: {}", certificate.role)?;
            writeln!(out, "Issued on {}", certificate.issued_on.format("%B %-d, %Y"))?;
            writeln!(out, "Verification code: {}", certificate.certificate_id)?;
            writeln!(out, "[d] download   [r] restart   [q] quit")?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionRecord;

    #[test]
    fn question_input_maps_to_zero_based_choice() {
        let stage = Stage::InProgress { index: 3 };
        assert_eq!(parse_action(stage, "2\n"), Action::Choose(1));
        assert_eq!(parse_action(stage, ""), Action::Next);
        assert_eq!(parse_action(stage, " S "), Action::Submit);
        assert_eq!(parse_action(stage, "0"), Action::Unknown("0".into()));
    }

    #[test]
    fn quit_works_everywhere_else_is_stage_scoped() {
        assert_eq!(parse_action(Stage::Report, "quit"), Action::Quit);
        assert_eq!(parse_action(Stage::Welcome, "a"), Action::About);
        assert_eq!(parse_action(Stage::About, "anything"), Action::Back);
        assert_eq!(
            parse_action(Stage::ModeSelection, "2"),
            Action::Mode(QuizMode::Fallback)
        );
        assert_eq!(
            parse_action(Stage::Certificate, "c"),
            Action::Unknown("c".into())
        );
    }

    #[test]
    fn question_view_marks_selection() {
        let options = ["A", "B", "C", "D"].map(String::from).to_vec();
        let question = QuestionRecord::new("Pick B", options, "B", "easy").unwrap();
        let view = SessionView::Question {
            number: 1,
            total: 30,
            role: "data_scientist",
            difficulty: "easy",
            question: &question,
            selected: Some("B"),
        };

        let mut out = Vec::new();
        render(&view, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Question 1 of 30"));
        assert!(text.contains(" *2) B"));
        assert!(text.contains("  1) A"));
    }
}
