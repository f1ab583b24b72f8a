use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::dto::FieldSpecResponse;

/// A `{label, value}` pair submitted for item create or update.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/item-field-request.ts"
)]
pub struct ItemFieldRequest {
    pub label: String,
    #[serde(default)]
    #[ts(type = "string | number | boolean | Array<string> | null")]
    pub value: Value,
}

/// Incoming payload for item creation.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-item-request.ts"
)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub fields: Option<Vec<ItemFieldRequest>>,
    #[serde(default)]
    pub creator_email: Option<String>,
}

/// Incoming payload for item updates.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-item-request.ts"
)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub fields: Option<Vec<ItemFieldRequest>>,
}

/// Listing parameters for `GET /crud/{crudId}/list`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// API representation of an item field.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/item-field-response.ts"
)]
pub struct ItemFieldResponse {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | number | boolean | Array<string> | undefined")]
    pub value: Option<Value>,
}

/// API representation of an item.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/crud-item-response.ts"
)]
pub struct CrudItemResponse {
    pub id: String,
    pub crud_id: String,
    pub fields: Vec<ItemFieldResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub creator_email: Option<String>,
    pub created_at: String,
}

/// One page of items with the schema needed to render them.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/item-page-response.ts"
)]
pub struct ItemPageResponse {
    pub items: Vec<CrudItemResponse>,
    pub name: String,
    pub fields: Vec<FieldSpecResponse>,
}
