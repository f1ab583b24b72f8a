use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crudbase_core::AppError;

mod types;

pub use types::ErrorResponse;

/// Error code attached to every internal failure.
pub const UNEXPECTED_ERROR_CODE: &str = "unexpected_error";

/// Error code for registration with an email that is already taken.
pub const USER_ALREADY_EXISTS_CODE: &str = "user_already_exists";

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, payload) = match &self.0 {
            AppError::Validation(detail) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(detail.clone()))
            }
            AppError::NotFound(detail) => (StatusCode::NOT_FOUND, ErrorResponse::new(detail.clone())),
            AppError::Conflict(detail) => (StatusCode::CONFLICT, ErrorResponse::new(detail.clone())),
            AppError::Unauthorized(detail) => {
                (StatusCode::UNAUTHORIZED, ErrorResponse::new(detail.clone()))
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_code("unexpected error".to_owned(), UNEXPECTED_ERROR_CODE),
                )
            }
        };

        (status, Json(payload)).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
