use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a fallback question file.
///
/// None of these are fatal: the loader logs them and marks the role unavailable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} contains no valid questions", path.display())]
    Empty { path: PathBuf },
}
