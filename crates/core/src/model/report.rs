use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Answer, CertificateId, Intake, QuestionRecord};

/// One row of the answer review shown on the report page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// 1-based question number.
    pub number: usize,
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Score summary for a submitted quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub full_name: String,
    pub role: String,
    pub difficulty: String,
    pub score: usize,
    pub total: usize,
    pub items: Vec<ReviewItem>,
}

impl ScoreReport {
    /// Score a set of answers against their questions.
    ///
    /// `answers` is aligned with `questions` by index; missing trailing answers
    /// count as unanswered.
    #[must_use]
    pub fn build(intake: &Intake, questions: &[QuestionRecord], answers: &[Answer]) -> Self {
        let items: Vec<ReviewItem> = questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let answer = answers.get(index).unwrap_or(&Answer::NotAnswered);
                ReviewItem {
                    number: index + 1,
                    question: question.question().to_string(),
                    your_answer: answer.as_str().to_string(),
                    correct_answer: question.answer().to_string(),
                    is_correct: answer.matches(question.answer()),
                }
            })
            .collect();

        Self {
            full_name: intake.full_name().to_string(),
            role: intake.role().to_string(),
            difficulty: intake.difficulty().to_string(),
            score: score(questions, answers),
            total: questions.len(),
            items,
        }
    }

    /// Whole-number percentage, 0 for an empty quiz.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let pct = self.score * 100 / self.total;
        u32::try_from(pct).unwrap_or(100)
    }
}

/// Count positions where the recorded answer equals the correct answer.
#[must_use]
pub fn score(questions: &[QuestionRecord], answers: &[Answer]) -> usize {
    questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| answer.matches(question.answer()))
        .count()
}

/// Completion certificate issued from a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub full_name: String,
    pub role: String,
    pub issued_on: NaiveDate,
    pub certificate_id: CertificateId,
}

impl Certificate {
    #[must_use]
    pub fn issue(report: &ScoreReport, issued_on: NaiveDate) -> Self {
        Self {
            full_name: report.full_name.clone(),
            role: report.role.clone(),
            issued_on,
            certificate_id: CertificateId::generate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: &str) -> QuestionRecord {
        let options = ["A", "B", "C", "D"].map(String::from).to_vec();
        QuestionRecord::new("Q", options, answer, "easy").unwrap()
    }

    fn intake() -> Intake {
        Intake::new("Ada", "ada@example.com", "Data Scientist", "easy").unwrap()
    }

    #[test]
    fn all_unanswered_scores_zero() {
        let questions: Vec<_> = (0..30).map(|_| question("A")).collect();
        let answers = vec![Answer::NotAnswered; 30];
        assert_eq!(score(&questions, &answers), 0);

        let report = ScoreReport::build(&intake(), &questions, &answers);
        assert_eq!(report.score, 0);
        assert!(report.items.iter().all(|i| i.your_answer == "Not answered"));
    }

    #[test]
    fn report_marks_each_item() {
        let questions = vec![question("A"), question("B"), question("C")];
        let answers = vec![
            Answer::Chosen("A".into()),
            Answer::Chosen("C".into()),
            Answer::NotAnswered,
        ];

        let report = ScoreReport::build(&intake(), &questions, &answers);
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 3);
        assert_eq!(report.percent(), 33);
        assert_eq!(report.items[1].number, 2);
        assert!(report.items[0].is_correct);
        assert!(!report.items[1].is_correct);
        assert_eq!(report.items[1].correct_answer, "B");
    }

    #[test]
    fn short_answer_list_counts_as_unanswered() {
        let questions = vec![question("A"), question("B")];
        let report = ScoreReport::build(&intake(), &questions, &[Answer::Chosen("A".into())]);
        assert_eq!(report.score, 1);
        assert_eq!(report.items[1].your_answer, "Not answered");
    }

    #[test]
    fn certificate_copies_identity() {
        let report = ScoreReport::build(&intake(), &[], &[]);
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let cert = Certificate::issue(&report, date);
        assert_eq!(cert.full_name, "Ada");
        assert_eq!(cert.role, "Data Scientist");
        assert_eq!(cert.issued_on, date);
        assert_eq!(report.percent(), 0);
    }

    #[test]
    fn certificate_serializes_issue_date_as_iso() {
        let report = ScoreReport::build(&intake(), &[question("A")], &[Answer::NotAnswered]);
        let cert = Certificate::issue(&report, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());

        let value = serde_json::to_value(&cert).unwrap();
        assert_eq!(value["issued_on"], "2024-03-09");

        let back: Certificate = serde_json::from_value(value).unwrap();
        assert_eq!(back.issued_on, cert.issued_on);
        assert_eq!(back.certificate_id, cert.certificate_id);
    }
}
