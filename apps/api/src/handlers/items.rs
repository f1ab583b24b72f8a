use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use crudbase_application::CreateItemInput;
use crudbase_core::AppError;

use crate::dto::{CreateItemRequest, CrudItemResponse, ItemPageResponse, ListItemsQuery, UpdateItemRequest};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

use super::{parse_crud_id, parse_item_id};

pub async fn list_items_handler(
    State(state): State<AppState>,
    Path(crud_id): Path<String>,
    ApiQuery(query): ApiQuery<ListItemsQuery>,
) -> ApiResult<Json<ItemPageResponse>> {
    let page = state
        .crud_service
        .list_items(parse_crud_id(crud_id.as_str())?, query.into())
        .await?;

    Ok(Json(ItemPageResponse::from(page)))
}

pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> ApiResult<Json<CrudItemResponse>> {
    let item = state
        .crud_service
        .get_item(parse_item_id(item_id.as_str())?)
        .await?;

    Ok(Json(CrudItemResponse::from(item)))
}

pub async fn create_item_handler(
    State(state): State<AppState>,
    Path(crud_id): Path<String>,
    ApiJson(payload): ApiJson<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<CrudItemResponse>)> {
    let crud_id = parse_crud_id(crud_id.as_str())?;
    let item = state
        .crud_service
        .create_item(crud_id, CreateItemInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(CrudItemResponse::from(item))))
}

pub async fn update_item_handler(
    State(state): State<AppState>,
    Path((crud_id, item_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<UpdateItemRequest>,
) -> ApiResult<Json<CrudItemResponse>> {
    let crud_id = parse_crud_id(crud_id.as_str())?;
    let item_id = parse_item_id(item_id.as_str())?;
    let item = state
        .crud_service
        .update_item(crud_id, item_id, payload.into_proposed_fields()?)
        .await?;

    Ok(Json(CrudItemResponse::from(item)))
}

pub async fn delete_item_handler(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> ApiResult<Json<CrudItemResponse>> {
    let item_id = parse_item_id(item_id.as_str())?;
    let deleted = state
        .crud_service
        .delete_item(item_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item '{item_id}' not found")))?;

    Ok(Json(CrudItemResponse::from(deleted)))
}
