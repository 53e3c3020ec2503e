use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::storage::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Deliberately covers both "does not exist" and "belongs to someone else".
    #[error("Not found or forbidden: {0}")]
    NotFoundOrForbidden(String),

    #[error("No experiences added")]
    NoExperience,

    #[error("Generation service error: {0}")]
    GenerationService(String),

    #[error("Malformed generation response: {0}")]
    MalformedResponse(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Persistence(err.to_string())
    }
}

/// Status, machine code, user-facing message and optional detail for the envelope.
pub(crate) struct ErrorParts {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub detail: Option<String>,
}

impl AppError {
    pub(crate) fn parts(&self) -> ErrorParts {
        let (status, code, message, detail) = match self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::NotFoundOrForbidden(msg) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND_OR_FORBIDDEN",
                msg.clone(),
                None,
            ),
            AppError::NoExperience => (
                StatusCode::BAD_REQUEST,
                "NO_EXPERIENCE",
                "Unable to generate content: no experiences added.".to_string(),
                None,
            ),
            AppError::GenerationService(detail) => {
                tracing::error!("Generation service error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_SERVICE_ERROR",
                    "The content generation service failed".to_string(),
                    Some(detail.clone()),
                )
            }
            AppError::MalformedResponse(detail) => {
                tracing::error!("Malformed generation response: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MALFORMED_RESPONSE",
                    "Generated content was not in the expected format".to_string(),
                    Some(detail.clone()),
                )
            }
            AppError::Persistence(detail) => {
                tracing::error!("Persistence error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_ERROR",
                    "A storage error occurred".to_string(),
                    None,
                )
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
                None,
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        ErrorParts {
            status,
            code,
            message,
            detail,
        }
    }
}

/// Builds the `{ success: false, code, message, error? }` envelope.
/// `extra` fields are merged into the top-level object.
pub(crate) fn envelope(parts: ErrorParts, extra: Map<String, Value>) -> Response {
    let mut body = json!({
        "success": false,
        "code": parts.code,
        "message": parts.message,
    });

    if let Value::Object(obj) = &mut body {
        if let Some(detail) = parts.detail {
            obj.insert("error".to_string(), Value::String(detail));
        }
        obj.extend(extra);
    }

    (parts.status, Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        envelope(self.parts(), Map::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_no_experience_maps_to_400_envelope() {
        let response = AppError::NoExperience.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "NO_EXPERIENCE");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .ends_with("no experiences added."));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_generation_error_surfaces_upstream_detail() {
        let response =
            AppError::GenerationService("API error (status 503): overloaded".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "API error (status 503): overloaded");
    }

    #[tokio::test]
    async fn test_persistence_detail_is_not_echoed() {
        let response =
            AppError::Persistence("relation \"documents\" does not exist".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(body.get("error").is_none());
        assert_eq!(body["message"], "A storage error occurred");
    }

    #[test]
    fn test_store_errors_become_persistence() {
        let err: AppError = StoreError::InvalidRecord("bad kind".to_string()).into();
        assert!(matches!(err, AppError::Persistence(_)));

        let err: AppError = StoreError::Unavailable("down".to_string()).into();
        assert!(matches!(err, AppError::Persistence(_)));
    }

    #[test]
    fn test_not_found_or_forbidden_is_404() {
        let parts = AppError::NotFoundOrForbidden("job application".to_string()).parts();
        assert_eq!(parts.status, StatusCode::NOT_FOUND);
    }
}
