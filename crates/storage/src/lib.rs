#![forbid(unsafe_code)]

pub mod error;
pub mod fallback;

pub use error::StorageError;
pub use fallback::{FallbackTable, RoleAvailability, load_role_file};
