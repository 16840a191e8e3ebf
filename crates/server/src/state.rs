use std::sync::Arc;

use services::QuestionProvider;

/// Shared handler state. The fallback table inside the provider is read-only.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<QuestionProvider>,
}

impl AppState {
    #[must_use]
    pub fn new(provider: QuestionProvider) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }
}
