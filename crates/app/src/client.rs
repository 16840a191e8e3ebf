use quiz_core::model::QuestionRecord;
use quiz_core::session::QuestionRequest;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    #[error("server answered {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct QuestionsBody {
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the question backend.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/generate-questions", self.base_url.trim_end_matches('/'))
    }

    /// Request a question set.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` for a non-success answer and
    /// `ClientError::Http` for transport or decoding failures, including a set
    /// that breaks the question invariants.
    pub async fn fetch_questions(
        &self,
        request: &QuestionRequest,
    ) -> Result<Vec<QuestionRecord>, ClientError> {
        let response = self.client.post(self.endpoint()).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(ClientError::Status { status, message });
        }

        let body: QuestionsBody = response.json().await?;
        Ok(body.questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use quiz_core::model::QuizMode;
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> BackendClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        BackendClient::new(format!("http://{addr}"))
    }

    fn request() -> QuestionRequest {
        QuestionRequest {
            role: "data_scientist".into(),
            difficulty: "easy".into(),
            mode: QuizMode::Fallback,
        }
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = BackendClient::new("http://localhost:4000/");
        assert_eq!(client.endpoint(), "http://localhost:4000/generate-questions");
    }

    #[tokio::test]
    async fn server_error_carries_its_message() {
        let client = serve(Router::new().route(
            "/generate-questions",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({"error": "Failed to load fallback questions for this role."})),
                )
            }),
        ))
        .await;

        let err = client.fetch_questions(&request()).await.unwrap_err();
        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(message, "Failed to load fallback questions for this role.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_uses_status_text() {
        let client = serve(Router::new().route(
            "/generate-questions",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        ))
        .await;

        let err = client.fetch_questions(&request()).await.unwrap_err();
        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status.as_u16(), 502);
                assert_eq!(message, "502 Bad Gateway");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn success_returns_validated_questions() {
        let client = serve(Router::new().route(
            "/generate-questions",
            post(|| async {
                axum::Json(json!({"questions": [
                    {"question": "Q", "options": ["a", "b", "c", "d"], "answer": "c", "difficulty": "easy"}
                ]}))
            }),
        ))
        .await;

        let questions = client.fetch_questions(&request()).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].answer(), "c");
    }

    #[tokio::test]
    async fn invalid_question_in_response_is_an_error() {
        let client = serve(Router::new().route(
            "/generate-questions",
            post(|| async {
                axum::Json(json!({"questions": [
                    {"question": "Q", "options": ["a", "b"], "answer": "z", "difficulty": "easy"}
                ]}))
            }),
        ))
        .await;

        let err = client.fetch_questions(&request()).await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }
}
