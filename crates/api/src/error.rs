use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use animagen_gemini::GeminiError;
use animagen_render::RenderError;
use animagen_storage::StorageError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the pipeline stage errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
/// Every pipeline failure is fatal to the current request and surfaced to
/// the caller as a single error message; there is no partial-success state.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The generative-model call failed.
    #[error(transparent)]
    Gemini(#[from] GeminiError),

    /// Rendering failed (bad script, renderer exit, missing output).
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Uploading the artifact failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Gemini(err) => {
                tracing::error!(error = %err, "Code generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_FAILED",
                    err.to_string(),
                )
            }

            AppError::Render(err) => {
                tracing::error!(error = %err, "Rendering failed");
                let code = match err {
                    // Reported before any subprocess is spawned.
                    RenderError::Core(_) => "INVALID_SCRIPT",
                    RenderError::OutputMissing(_) => "RENDER_OUTPUT_MISSING",
                    _ => "RENDER_FAILED",
                };
                (StatusCode::INTERNAL_SERVER_ERROR, code, err.to_string())
            }

            AppError::Storage(err) => {
                tracing::error!(error = %err, "Upload failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPLOAD_FAILED",
                    err.to_string(),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
