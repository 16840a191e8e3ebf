#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ArgsError, ServerConfig};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
