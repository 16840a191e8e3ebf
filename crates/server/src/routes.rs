use std::path::Path;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use quiz_core::model::{QuestionRecord, QuizMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /generate-questions`. Every field must be a non-empty string.
///
/// Fields are kept as raw JSON so a wrong type reads as a missing field.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuestionsBody {
    #[serde(default)]
    pub role: Value,
    #[serde(default)]
    pub difficulty: Value,
    #[serde(default)]
    pub mode: Value,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<QuestionRecord>,
}

/// Build the application router.
///
/// Static files come from `public_dir`; any other GET, including a GET on the
/// API path, falls through to its `index.html` so the client can route on its own.
pub fn router(state: AppState, public_dir: &Path) -> Router {
    let static_files =
        ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        .route(
            "/generate-questions",
            post(generate_questions).fallback_service(static_files.clone()),
        )
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn generate_questions(
    State(state): State<AppState>,
    body: Result<Json<GenerateQuestionsBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.inspect_err(|rejection| {
        debug!(error = %rejection, "rejected question request body");
    })?;

    let (Some(role), Some(difficulty), Some(mode)) = (
        required(body.role),
        required(body.difficulty),
        required(body.mode),
    ) else {
        return Err(ApiError::MissingFields);
    };

    let set = state
        .provider
        .provide(&role, &difficulty, QuizMode::from_wire(&mode))
        .await?;
    info!(
        role = %role,
        source = %set.source,
        count = set.questions.len(),
        "question request served"
    );

    Ok((
        StatusCode::OK,
        Json(GenerateQuestionsResponse {
            questions: set.questions,
        }),
    ))
}

fn required(value: Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text),
        _ => None,
    }
}
