use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One field of a definition schema as submitted by a client.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/field-spec-request.ts"
)]
pub struct FieldSpecRequest {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

/// API representation of a definition field.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/field-spec-response.ts"
)]
pub struct FieldSpecResponse {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub options: Option<Vec<String>>,
}

/// Collaborator entry as submitted by a client.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-access-request.ts"
)]
pub struct UserAccessRequest {
    pub email: String,
    pub access_level: String,
}

/// API representation of a collaborator entry.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-access-response.ts"
)]
pub struct UserAccessResponse {
    pub email: String,
    pub access_level: String,
}

/// Incoming payload for definition creation.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-crud-request.ts"
)]
pub struct CreateCrudRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldSpecRequest>>,
    #[serde(default)]
    pub creator_email: Option<String>,
    #[serde(default)]
    pub users_with_access: Option<Vec<UserAccessRequest>>,
}

/// Incoming payload for definition updates.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-crud-request.ts"
)]
pub struct UpdateCrudRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldSpecRequest>>,
}

/// Owner filter for definition listing.
#[derive(Debug, Deserialize)]
pub struct ListCrudsQuery {
    pub email: Option<String>,
}

/// API representation of a definition.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/crud-response.ts"
)]
pub struct CrudResponse {
    pub id: String,
    pub name: String,
    pub fields: Vec<FieldSpecResponse>,
    pub creator_email: String,
    pub users_with_access: Vec<UserAccessResponse>,
    pub created_at: String,
}

/// Result of a cascading definition delete.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-crud-response.ts"
)]
pub struct DeleteCrudResponse {
    pub definition: CrudResponse,
    #[ts(type = "number")]
    pub deleted_item_count: u64,
}
