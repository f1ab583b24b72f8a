use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crudbase_application::{RegisterUserInput, RegistrationOutcome};
use crudbase_core::AppError;
use tracing::info;

use crate::dto::{CreateUserRequest, UserResponse};
use crate::error::{ApiResult, ErrorResponse, USER_ALREADY_EXISTS_CODE};
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn list_users_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_service
        .list_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

/// Registers a user. A taken email answers 200 with an error body instead of failing.
pub async fn create_user_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> ApiResult<Response> {
    let (Some(name), Some(email), Some(password)) = (
        payload.name.filter(|value| !value.trim().is_empty()),
        payload.email.filter(|value| !value.trim().is_empty()),
        payload.password.filter(|value| !value.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "Invalid body, name, email and password are required.".to_owned(),
        )
        .into());
    };

    let outcome = state
        .user_service
        .create_user(RegisterUserInput {
            name,
            email,
            password,
        })
        .await?;

    match outcome {
        RegistrationOutcome::Created(user) => {
            info!(user_id = %user.id(), "user created");
            Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
        }
        RegistrationOutcome::AlreadyExists => Ok((
            StatusCode::OK,
            Json(ErrorResponse::with_code(
                "user already exists".to_owned(),
                USER_ALREADY_EXISTS_CODE,
            )),
        )
            .into_response()),
    }
}
