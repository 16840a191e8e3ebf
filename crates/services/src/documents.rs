//! Standalone HTML exports of the score report and the certificate.
//!
//! All text that came from a user or a model passes through
//! `ammonia::clean_text` before it is placed in markup.

use std::fmt::Write as _;

use ammonia::clean_text;
use quiz_core::model::{Certificate, ScoreReport};

/// A rendered document and the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub html: String,
}

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
h1{margin-bottom:.25rem}.meta{color:#555}\
.item{border-bottom:1px solid #ddd;padding:.5rem 0}\
.correct{color:#1a7f37}.wrong{color:#cf222e}\
.certificate{border:8px double #444;padding:3rem;text-align:center}";

/// Render the report page with the per-question review.
#[must_use]
pub fn report_document(report: &ScoreReport) -> Document {
    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>Assessment Report</h1>\
         <p class=\"meta\">Name: {}<br>Role: {}<br>Difficulty: {}</p>\
         <h2>Score: {} / {} ({}%)</h2>",
        clean_text(&report.full_name),
        clean_text(&report.role),
        clean_text(&report.difficulty),
        report.score,
        report.total,
        report.percent(),
    );

    for item in &report.items {
        let class = if item.is_correct { "correct" } else { "wrong" };
        let _ = write!(
            body,
            "<div class=\"item\"><p><strong>{}.</strong> {}</p>\
             <p class=\"{class}\">Your Answer: {}</p>\
             <p>Correct Answer: {}</p></div>",
            item.number,
            clean_text(&item.question),
            clean_text(&item.your_answer),
            clean_text(&item.correct_answer),
        );
    }

    Document {
        file_name: format!("{}_Assessment_Report.html", file_stem(&report.full_name)),
        html: page("Assessment Report", &body),
    }
}

/// Render the completion certificate.
#[must_use]
pub fn certificate_document(certificate: &Certificate) -> Document {
    let body = format!(
        "<div class=\"certificate\">\
         <h1>Certificate of Completion</h1>\
         <p>This certifies that</p><h2>{}</h2>\
         <p>has completed the {} assessment</p>\
         <p class=\"meta\">Issued on {}</p>\
         <p class=\"meta\">Verification code: {}</p>\
         </div>",
        clean_text(&certificate.full_name),
        clean_text(&certificate.role),
        certificate.issued_on.format("%B %-d, %Y"),
        certificate.certificate_id,
    );

    Document {
        file_name: format!("{}_Certificate.html", file_stem(&certificate.full_name)),
        html: page("Certificate", &body),
    }
}

/// File-system safe version of a person's name.
#[must_use]
pub fn file_stem(full_name: &str) -> String {
    let stem: String = full_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "participant".to_string()
    } else {
        stem.to_string()
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{title}</title><style>{STYLE}</style></head><body>{body}</body></html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quiz_core::model::{Answer, Intake, QuestionRecord};

    fn report(name: &str) -> ScoreReport {
        let options = ["<b>A</b>", "B", "C", "D"].map(String::from).to_vec();
        let question = QuestionRecord::new("Is <script>alert(1)</script> safe?", options, "B", "easy")
            .unwrap();
        let intake = Intake::new(name, "x@example.com", "Data Scientist", "easy").unwrap();
        ScoreReport::build(&intake, &[question], &[Answer::Chosen("<b>A</b>".into())])
    }

    #[test]
    fn report_escapes_model_text() {
        let doc = report_document(&report("Ada"));
        assert!(!doc.html.contains("<script>"));
        assert!(doc.html.contains("&lt;script&gt;"));
        assert!(!doc.html.contains("<b>A</b>"));
        assert!(doc.html.contains("class=\"wrong\""));
        assert_eq!(doc.file_name, "Ada_Assessment_Report.html");
    }

    #[test]
    fn certificate_names_person_and_date() {
        let cert = Certificate::issue(
            &report("Ada Lovelace"),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        );
        let doc = certificate_document(&cert);
        assert!(doc.html.contains("March 9, 2024"));
        assert!(doc.html.contains(&cert.certificate_id.to_string()));
        assert_eq!(doc.file_name, "Ada_Lovelace_Certificate.html");
    }

    #[test]
    fn file_stem_strips_path_characters() {
        assert_eq!(file_stem("../etc/passwd"), "_etc_passwd");
        assert_eq!(file_stem("   "), "participant");
        assert_eq!(file_stem("José Núñez"), "José_Núñez");
    }
}
