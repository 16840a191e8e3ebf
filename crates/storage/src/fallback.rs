use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quiz_core::model::{QuestionDraft, QuestionRecord, RoleKey};
use quiz_core::selection::select_fallback;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::StorageError;

/// On-disk shape of a fallback file.
#[derive(Debug, Deserialize)]
struct FallbackFile {
    questions: Vec<QuestionDraft>,
}

/// Load state of one role's fallback set.
#[derive(Debug, Clone)]
pub enum RoleAvailability {
    Available(Arc<[QuestionRecord]>),
    Unavailable { reason: String },
}

impl RoleAvailability {
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Pre-authored questions keyed by role, built once at startup.
///
/// The table is immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct FallbackTable {
    roles: BTreeMap<RoleKey, RoleAvailability>,
}

impl FallbackTable {
    /// File name holding a role's questions, e.g. `data_scientist_questions.json`.
    #[must_use]
    pub fn file_name(role: &RoleKey) -> String {
        format!("{role}_questions.json")
    }

    /// Load every role in `roles` from `dir`.
    ///
    /// A missing or unparseable file marks that role unavailable with the
    /// reason attached; it never fails the whole load.
    pub fn load_dir(dir: impl AsRef<Path>, roles: impl IntoIterator<Item = RoleKey>) -> Self {
        let dir = dir.as_ref();
        let mut table = Self::default();

        for role in roles {
            let path = dir.join(Self::file_name(&role));
            let entry = match load_role_file(&path) {
                Ok(questions) => {
                    info!(role = %role, count = questions.len(), "preloaded fallback questions");
                    RoleAvailability::Available(questions.into())
                }
                Err(err) => RoleAvailability::Unavailable {
                    reason: err.to_string(),
                },
            };
            table.roles.insert(role, entry);
        }

        table
    }

    /// Build a table from in-memory sets, mostly for tests.
    #[must_use]
    pub fn from_sets(sets: impl IntoIterator<Item = (RoleKey, Vec<QuestionRecord>)>) -> Self {
        let roles = sets
            .into_iter()
            .map(|(role, questions)| (role, RoleAvailability::Available(questions.into())))
            .collect();
        Self { roles }
    }

    /// The full authored sequence for a role, if it loaded.
    #[must_use]
    pub fn questions(&self, role: &RoleKey) -> Option<&[QuestionRecord]> {
        match self.roles.get(role)? {
            RoleAvailability::Available(questions) => Some(&questions[..]),
            RoleAvailability::Unavailable { .. } => None,
        }
    }

    /// Pick a quiz for `role` at `difficulty`.
    ///
    /// Empty when the role is unknown, failed to load, or has no questions.
    #[must_use]
    pub fn select(&self, role: &RoleKey, difficulty: &str) -> Vec<QuestionRecord> {
        self.questions(role)
            .map(|questions| select_fallback(questions, difficulty))
            .unwrap_or_default()
    }

    /// Load state per role, in key order.
    pub fn availability(&self) -> impl Iterator<Item = (&RoleKey, &RoleAvailability)> {
        self.roles.iter()
    }

    /// Number of roles with a usable set.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.roles.values().filter(|r| r.is_available()).count()
    }
}

/// Read and validate one fallback file.
///
/// Records that break the question invariants are skipped with a warning.
///
/// # Errors
///
/// Returns `StorageError` if the file cannot be read or parsed, or holds no
/// valid question.
pub fn load_role_file(path: &Path) -> Result<Vec<QuestionRecord>, StorageError> {
    let raw = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: FallbackFile = serde_json::from_str(&raw).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let questions: Vec<QuestionRecord> = file
        .questions
        .into_iter()
        .enumerate()
        .filter_map(|(index, draft)| match draft.validate() {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    index,
                    error = %err,
                    "skipping invalid fallback question"
                );
                None
            }
        })
        .collect();

    if questions.is_empty() {
        return Err(StorageError::Empty {
            path: PathBuf::from(path),
        });
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, difficulty: &str) -> QuestionRecord {
        let options = ["A", "B", "C", "D"].map(String::from).to_vec();
        QuestionRecord::new(format!("Q{index}"), options, "A", difficulty).unwrap()
    }

    #[test]
    fn file_name_uses_role_key() {
        let role = RoleKey::normalize("Computer Vision Engineer");
        assert_eq!(
            FallbackTable::file_name(&role),
            "computer_vision_engineer_questions.json"
        );
    }

    #[test]
    fn select_degrades_when_difficulty_is_scarce() {
        let role = RoleKey::normalize("data_scientist");
        let mut set: Vec<_> = (0..40).map(|i| record(i, "hard")).collect();
        set.extend((40..45).map(|i| record(i, "easy")));
        let table = FallbackTable::from_sets([(role.clone(), set.clone())]);

        let picked = table.select(&role, "easy");
        assert_eq!(picked.len(), 30);
        assert_eq!(picked, set[..30].to_vec());
    }

    #[test]
    fn unknown_role_selects_nothing() {
        let table = FallbackTable::from_sets([(
            RoleKey::normalize("ai_researcher"),
            vec![record(0, "easy")],
        )]);
        assert!(table.select(&RoleKey::normalize("chef"), "easy").is_empty());
        assert!(table.questions(&RoleKey::normalize("chef")).is_none());
    }
}
