use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quiz_core::model::QuizMode;
use serde_json::json;
use services::ProviderError;
use thiserror::Error;

pub const REQUIRED_FIELDS: &str = "Role, difficulty, and mode are required.";
pub const FALLBACK_UNAVAILABLE: &str = "Failed to load fallback questions for this role.";
pub const GENERATION_UNAVAILABLE: &str =
    "Failed to generate questions. No API or fallback available.";

/// Errors surfaced to HTTP clients as `{ "error": ... }`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("role, difficulty, and mode are required")]
    MissingFields,
    #[error(transparent)]
    Body(#[from] JsonRejection),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields | ApiError::Body(_) => StatusCode::BAD_REQUEST,
            ApiError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::MissingFields => REQUIRED_FIELDS.to_string(),
            ApiError::Body(rejection) => rejection.body_text(),
            ApiError::Provider(ProviderError::Unavailable {
                mode: QuizMode::Fallback,
                ..
            }) => FALLBACK_UNAVAILABLE.to_string(),
            ApiError::Provider(_) => GENERATION_UNAVAILABLE.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}
