#![forbid(unsafe_code)]

pub mod documents;
pub mod error;
pub mod generator;
pub mod payload;
pub mod provider;

pub use quiz_core::Clock;

pub use error::{GenerationError, ProviderError};
pub use generator::{GeminiGenerator, GeneratorConfig, QuestionGenerator};
pub use provider::{QuestionProvider, QuestionSet, QuestionSource};
