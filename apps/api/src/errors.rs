use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::pipeline::AnalysisError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": message
                    }
                })),
            )
                .into_response(),
            AppError::Multipart(e) => {
                let status = e.status();
                (
                    status,
                    Json(json!({
                        "error": {
                            "code": "MALFORMED_MULTIPART",
                            "message": e.body_text()
                        }
                    })),
                )
                    .into_response()
            }
            // Every pipeline failure looks the same to the client.
            AppError::Analysis(e) => {
                match &e {
                    AnalysisError::Extraction(inner) => tracing::error!("Extraction error: {inner}"),
                    AnalysisError::Completion(inner) => tracing::error!("LLM error: {inner}"),
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
