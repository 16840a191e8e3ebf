//! Fallback question selection.
//!
//! The static table is served in authoring order. A difficulty filter is only
//! honoured when it can fill a whole quiz; otherwise the first
//! [`QUIZ_LENGTH`] records are served regardless of difficulty.

use crate::model::QuestionRecord;

/// Number of questions in one quiz.
pub const QUIZ_LENGTH: usize = 30;

/// Pick the question set for a difficulty from a role's authored sequence.
///
/// Returns an empty vector only when `questions` is empty.
///
/// # Examples
///
/// ```
/// # use quiz_core::model::QuestionRecord;
/// # use quiz_core::selection::select_fallback;
/// let opts = || ["a", "b", "c", "d"].map(String::from).to_vec();
/// let set: Vec<_> = (0..40)
///     .map(|i| QuestionRecord::new(format!("q{i}"), opts(), "a", "hard").unwrap())
///     .collect();
/// assert_eq!(select_fallback(&set, "HARD").len(), 30);
/// ```
#[must_use]
pub fn select_fallback(questions: &[QuestionRecord], difficulty: &str) -> Vec<QuestionRecord> {
    let matching: Vec<&QuestionRecord> = questions
        .iter()
        .filter(|q| q.has_difficulty(difficulty))
        .collect();

    if matching.len() >= QUIZ_LENGTH {
        return matching.into_iter().take(QUIZ_LENGTH).cloned().collect();
    }

    questions.iter().take(QUIZ_LENGTH).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, difficulty: &str) -> QuestionRecord {
        let options = ["A", "B", "C", "D"].map(String::from).to_vec();
        QuestionRecord::new(format!("Q{index}"), options, "A", difficulty).unwrap()
    }

    fn mixed(easy: usize, other: usize) -> Vec<QuestionRecord> {
        // Interleave so that a filtered pick is distinguishable from a prefix.
        let mut out = Vec::new();
        for i in 0..other {
            out.push(record(out.len(), if i % 2 == 0 { "medium" } else { "hard" }));
        }
        for _ in 0..easy {
            out.push(record(out.len(), "easy"));
        }
        out
    }

    #[test]
    fn enough_matches_returns_thirty_of_that_difficulty() {
        let set = mixed(35, 10);
        let picked = select_fallback(&set, "Easy");
        assert_eq!(picked.len(), QUIZ_LENGTH);
        assert!(picked.iter().all(|q| q.has_difficulty("easy")));
        assert_eq!(picked[0].question(), "Q10");
    }

    #[test]
    fn exactly_thirty_matches_uses_filter() {
        let set = mixed(30, 10);
        let picked = select_fallback(&set, "easy");
        assert!(picked.iter().all(|q| q.has_difficulty("easy")));
        assert_eq!(picked.len(), 30);
    }

    #[test]
    fn too_few_matches_degrades_to_unfiltered_prefix() {
        let set = mixed(5, 40);
        let picked = select_fallback(&set, "easy");
        assert_eq!(picked.len(), QUIZ_LENGTH);
        assert_eq!(picked, set[..QUIZ_LENGTH].to_vec());
        assert!(picked.iter().all(|q| !q.has_difficulty("easy")));
    }

    #[test]
    fn short_sets_are_served_whole() {
        let set = mixed(3, 4);
        assert_eq!(select_fallback(&set, "easy"), set);
    }

    #[test]
    fn empty_set_selects_nothing() {
        assert!(select_fallback(&[], "easy").is_empty());
    }
}
