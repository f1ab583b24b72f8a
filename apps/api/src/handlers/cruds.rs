use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use crudbase_application::{CreateCrudInput, UpdateCrudInput};
use crudbase_core::AppError;
use tracing::info;

use crate::dto::{CreateCrudRequest, CrudResponse, DeleteCrudResponse, ListCrudsQuery, UpdateCrudRequest};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

use super::parse_crud_id;

pub async fn create_crud_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateCrudRequest>,
) -> ApiResult<(StatusCode, Json<CrudResponse>)> {
    let definition = state
        .crud_service
        .create_definition(CreateCrudInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(CrudResponse::from(definition))))
}

pub async fn list_cruds_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListCrudsQuery>,
) -> ApiResult<Json<Vec<CrudResponse>>> {
    let email = query
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| AppError::Validation("email is required".to_owned()))?;

    let definitions = state
        .crud_service
        .list_definitions_by_owner(email.as_str())
        .await?
        .into_iter()
        .map(CrudResponse::from)
        .collect();

    Ok(Json(definitions))
}

pub async fn get_crud_handler(
    State(state): State<AppState>,
    Path(crud_id): Path<String>,
) -> ApiResult<Json<CrudResponse>> {
    let definition = state
        .crud_service
        .get_definition(parse_crud_id(crud_id.as_str())?)
        .await?;

    Ok(Json(CrudResponse::from(definition)))
}

pub async fn update_crud_handler(
    State(state): State<AppState>,
    Path(crud_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateCrudRequest>,
) -> ApiResult<Json<CrudResponse>> {
    let definition = state
        .crud_service
        .update_definition(
            parse_crud_id(crud_id.as_str())?,
            UpdateCrudInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(CrudResponse::from(definition)))
}

pub async fn delete_crud_handler(
    State(state): State<AppState>,
    Path(crud_id): Path<String>,
) -> ApiResult<Json<DeleteCrudResponse>> {
    let result = state
        .crud_service
        .delete_definition(parse_crud_id(crud_id.as_str())?)
        .await?;

    info!(
        crud_id = %result.definition.id(),
        deleted_item_count = result.deleted_item_count,
        "crud deleted"
    );

    Ok(Json(DeleteCrudResponse::from(result)))
}
