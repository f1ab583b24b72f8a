use axum::Json;
use axum::extract::{Extension, State};
use crudbase_application::AuthOutcome;
use crudbase_core::AppError;
use crudbase_domain::User;
use tracing::info;

use crate::dto::{AuthLoginRequest, AuthLoginResponse, UserResponse};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub async fn login_query_handler(
    State(state): State<AppState>,
    ApiQuery(payload): ApiQuery<AuthLoginRequest>,
) -> ApiResult<Json<AuthLoginResponse>> {
    login(&state, payload).await
}

pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AuthLoginRequest>,
) -> ApiResult<Json<AuthLoginResponse>> {
    login(&state, payload).await
}

pub async fn me_handler(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

async fn login(state: &AppState, payload: AuthLoginRequest) -> ApiResult<Json<AuthLoginResponse>> {
    let (Some(email), Some(password)) = (
        payload.email.filter(|value| !value.trim().is_empty()),
        payload.password.filter(|value| !value.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "Invalid body, email and password are required.".to_owned(),
        )
        .into());
    };

    match state.user_service.auth(email.as_str(), password.as_str()).await? {
        AuthOutcome::Authenticated(authenticated) => Ok(Json(AuthLoginResponse::from(authenticated))),
        AuthOutcome::NotFound => {
            info!(email = %email, "login rejected");
            Err(AppError::NotFound("User not found".to_owned()).into())
        }
    }
}
