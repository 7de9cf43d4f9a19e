//! Problem-Details error responses for the HTTP control surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use snomed_pipeline::JobControlError;

/// `{title, detail, status}` body returned on 4xx responses, per the
/// control surface's documented error shape.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    title: String,
    detail: String,
    status: u16,
}

impl ProblemDetails {
    fn new(status: StatusCode, title: &str, detail: impl Into<String>) -> Self {
        ProblemDetails {
            title: title.to_string(),
            detail: detail.into(),
            status: status.as_u16(),
        }
    }
}

/// Wraps a [`JobControlError`] so it can be returned directly as an
/// axum handler's error type.
pub struct ApiError(JobControlError);

impl From<JobControlError> for ApiError {
    fn from(error: JobControlError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title) = match &self.0 {
            JobControlError::AlreadyRunning => (StatusCode::CONFLICT, "Job already running"),
            JobControlError::NoCheckpoint => (StatusCode::NOT_FOUND, "No checkpoint"),
            JobControlError::NotRunning => (StatusCode::NOT_FOUND, "No job running"),
            JobControlError::NotPausedOrFailed => {
                (StatusCode::BAD_REQUEST, "Checkpoint not paused or failed")
            }
            JobControlError::SnapshotDirectoryMissing => {
                (StatusCode::BAD_REQUEST, "Snapshot directory not found")
            }
        };
        let body = ProblemDetails::new(status, title, self.0.to_string());
        (status, Json(body)).into_response()
    }
}
